//! D2Q9 velocity set and BGK equilibrium.
//!
//! ```text
//!   NW  N  NE
//!     \ | /
//!   W - 0 - E
//!     / | \
//!   SW  S  SE
//! ```
//!
//! `+y` is north. Renderers flip rows so `y = 0` is drawn at the bottom.

/// Number of discrete velocities.
pub const Q: usize = 9;

pub const REST: usize = 0;
pub const E: usize = 1;
pub const N: usize = 2;
pub const W: usize = 3;
pub const S: usize = 4;
pub const NE: usize = 5;
pub const NW: usize = 6;
pub const SW: usize = 7;
pub const SE: usize = 8;

/// Lattice vectors `[ex, ey]`.
pub const VELOCITIES: [[isize; 2]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

pub const WEIGHTS: [f64; Q] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// Reversed direction for each slot (bounce-back partner).
pub const OPPOSITE: [usize; Q] = [REST, W, S, E, N, SW, SE, NE, NW];

/// Lattice speed of sound, `1/sqrt(3)`.
pub const SOUND_SPEED: f64 = 0.577_350_269_189_625_8;

/// Standard BGK equilibrium:
/// `f_i = w_i rho (1 + 3 e·u + 4.5 (e·u)^2 - 1.5 u·u)`.
#[inline]
pub fn equilibrium(rho: f64, ux: f64, uy: f64) -> [f64; Q] {
    let u2 = 1.5 * (ux * ux + uy * uy);
    std::array::from_fn(|i| {
        let [ex, ey] = VELOCITIES[i];
        let eu = ex as f64 * ux + ey as f64 * uy;
        WEIGHTS[i] * rho * (1.0 + 3.0 * eu + 4.5 * eu * eu - u2)
    })
}

/// Density and velocity of a single cell.
#[inline]
pub fn moments(cell: &[f64; Q]) -> (f64, f64, f64) {
    let rho: f64 = cell.iter().sum();
    let jx = cell[E] + cell[NE] + cell[SE] - cell[W] - cell[NW] - cell[SW];
    let jy = cell[N] + cell[NE] + cell[NW] - cell[S] - cell[SE] - cell[SW];
    (rho, jx / rho, jy / rho)
}
