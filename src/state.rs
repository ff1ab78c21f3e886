use crate::error::{EngineError, Result};
use crate::solver::d2q9::{self, Q};

/// Smallest lattice edge that leaves a boundary ring plus a non-empty guard band.
pub const MIN_DIM: usize = 5;

/// Width of the margin on each edge where barriers may not be placed.
pub const GUARD_BAND: usize = 2;

/// Fixed rectangular lattice geometry, row-major (`x + y * x_dim`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lattice {
    x_dim: usize,
    y_dim: usize,
}

impl Lattice {
    pub fn new(x_dim: usize, y_dim: usize) -> Result<Self> {
        if x_dim < MIN_DIM || y_dim < MIN_DIM {
            return Err(EngineError::LatticeTooSmall { x_dim, y_dim, min: MIN_DIM });
        }
        Ok(Self { x_dim, y_dim })
    }

    pub fn x_dim(&self) -> usize {
        self.x_dim
    }

    pub fn y_dim(&self) -> usize {
        self.y_dim
    }

    pub fn size(&self) -> usize {
        self.x_dim * self.y_dim
    }

    /// Row-major index. Panics when `(x, y)` lies outside the lattice.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) is outside the {}x{} lattice",
            self.x_dim,
            self.y_dim
        );
        x + y * self.x_dim
    }

    /// Fast index for loops whose bounds already guarantee `(x, y)` is in range.
    #[inline(always)]
    pub(crate) const fn idx_inner(&self, x: usize, y: usize) -> usize {
        x + y * self.x_dim
    }

    pub fn checked_idx(&self, x: usize, y: usize) -> Result<usize> {
        if self.contains(x, y) {
            Ok(self.idx_inner(x, y))
        } else {
            Err(EngineError::OutOfBounds { x, y, x_dim: self.x_dim, y_dim: self.y_dim })
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.x_dim && y < self.y_dim
    }

    /// Everything except the outermost ring of width 1.
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x + 1 < self.x_dim && y + 1 < self.y_dim
    }

    /// Cells where a barrier may live: the outermost two cells on every edge are excluded,
    /// so a barrier's eight neighbours are always interior cells.
    pub fn in_guard_band(&self, x: usize, y: usize) -> bool {
        x >= GUARD_BAND
            && y >= GUARD_BAND
            && x + GUARD_BAND < self.x_dim
            && y + GUARD_BAND < self.y_dim
    }

    pub fn coords(&self, i: usize) -> (usize, usize) {
        (i % self.x_dim, i / self.x_dim)
    }
}

/// Per-cell simulation state. Populations are stored as one nine-slot record per cell.
pub struct LatticeState {
    pub lattice: Lattice,
    /// D2Q9 populations, indexed by the direction constants in `d2q9`.
    pub f: Vec<[f64; Q]>,
    /// Macroscopic density.
    pub rho: Vec<f64>,
    pub ux: Vec<f64>,
    pub uy: Vec<f64>,
    /// Central-difference vorticity; the outer ring is never written.
    pub curl: Vec<f64>,
    pub barrier: Vec<bool>,
}

impl LatticeState {
    /// Uniform flow at `(ux, uy)` and density `rho`, no barriers, zero curl.
    pub fn new_uniform(lattice: Lattice, rho: f64, ux: f64, uy: f64) -> Self {
        let size = lattice.size();
        Self {
            lattice,
            f: vec![d2q9::equilibrium(rho, ux, uy); size],
            rho: vec![rho; size],
            ux: vec![ux; size],
            uy: vec![uy; size],
            curl: vec![0.0; size],
            barrier: vec![false; size],
        }
    }

    /// Overwrite one cell with the equilibrium for `(rho, ux, uy)`.
    #[inline]
    pub fn set_equilibrium(&mut self, i: usize, rho: f64, ux: f64, uy: f64) {
        self.f[i] = d2q9::equilibrium(rho, ux, uy);
        self.rho[i] = rho;
        self.ux[i] = ux;
        self.uy[i] = uy;
    }

    /// Re-initialise the fluid to uniform flow, leaving barriers untouched.
    pub fn reset_fluid(&mut self, rho: f64, ux: f64, uy: f64) {
        let eq = d2q9::equilibrium(rho, ux, uy);
        self.f.fill(eq);
        self.rho.fill(rho);
        self.ux.fill(ux);
        self.uy.fill(uy);
        self.curl.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_rejects_small_dims() {
        assert_eq!(
            Lattice::new(4, 10),
            Err(EngineError::LatticeTooSmall { x_dim: 4, y_dim: 10, min: MIN_DIM })
        );
        assert!(Lattice::new(10, 4).is_err());
        assert!(Lattice::new(5, 5).is_ok());
    }

    #[test]
    fn test_idx_row_major() {
        let lat = Lattice::new(7, 5).unwrap();
        assert_eq!(lat.idx(0, 0), 0);
        assert_eq!(lat.idx(6, 0), 6);
        assert_eq!(lat.idx(0, 1), 7);
        assert_eq!(lat.idx(3, 4), 3 + 4 * 7);
        assert_eq!(lat.coords(lat.idx(3, 4)), (3, 4));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_idx_out_of_range_panics() {
        let lat = Lattice::new(7, 5).unwrap();
        lat.idx(7, 0);
    }

    #[test]
    fn test_checked_idx() {
        let lat = Lattice::new(7, 5).unwrap();
        assert_eq!(lat.checked_idx(2, 3), Ok(23));
        assert_eq!(
            lat.checked_idx(2, 5),
            Err(EngineError::OutOfBounds { x: 2, y: 5, x_dim: 7, y_dim: 5 })
        );
    }

    #[test]
    fn test_guard_band_minimum_lattice() {
        // 5x5 leaves exactly one placeable cell in the middle
        let lat = Lattice::new(5, 5).unwrap();
        let placeable: Vec<_> = (0..5)
            .flat_map(|y| (0..5).map(move |x| (x, y)))
            .filter(|&(x, y)| lat.in_guard_band(x, y))
            .collect();
        assert_eq!(placeable, vec![(2, 2)]);
    }

    #[test]
    fn test_interior_excludes_ring() {
        let lat = Lattice::new(6, 6).unwrap();
        assert!(!lat.is_interior(0, 3));
        assert!(!lat.is_interior(5, 3));
        assert!(!lat.is_interior(3, 0));
        assert!(!lat.is_interior(3, 5));
        assert!(lat.is_interior(1, 1));
        assert!(lat.is_interior(4, 4));
    }

    #[test]
    fn test_new_uniform_sums_to_rho() {
        let lat = Lattice::new(8, 6).unwrap();
        let state = LatticeState::new_uniform(lat, 1.0, 0.1, 0.0);
        for cell in &state.f {
            let sum: f64 = cell.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "populations should sum to rho, got {}", sum);
        }
        assert!(state.barrier.iter().all(|b| !b));
        assert!(state.curl.iter().all(|c| *c == 0.0));
    }

    #[test]
    fn test_reset_fluid_keeps_barriers() {
        let lat = Lattice::new(8, 8).unwrap();
        let mut state = LatticeState::new_uniform(lat, 1.0, 0.1, 0.0);
        let i = lat.idx(3, 3);
        state.barrier[i] = true;
        state.f[i] = [0.5; Q];
        state.curl[i] = 0.2;
        state.reset_fluid(1.0, 0.05, 0.0);
        assert!(state.barrier[i]);
        assert_eq!(state.curl[i], 0.0);
        assert_eq!(state.f[i], d2q9::equilibrium(1.0, 0.05, 0.0));
    }
}
