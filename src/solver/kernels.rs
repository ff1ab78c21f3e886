use rayon::prelude::*;

use super::d2q9::{self, OPPOSITE, Q, VELOCITIES};
use crate::state::LatticeState;

/// Below this many cells the collide sweep stays on the calling thread.
const PAR_MIN_CELLS: usize = 16 * 1024;

#[inline]
fn offset(v: usize, d: isize) -> usize {
    v.wrapping_add_signed(d)
}

/// BGK relaxation of one cell toward its local equilibrium. Returns the
/// pre-collision moments.
#[inline]
fn collide_cell(cell: &mut [f64; Q], omega: f64) -> (f64, f64, f64) {
    let (rho, ux, uy) = d2q9::moments(cell);
    let feq = d2q9::equilibrium(rho, ux, uy);
    for (n, n_eq) in cell.iter_mut().zip(feq) {
        *n += omega * (n_eq - *n);
    }
    (rho, ux, uy)
}

fn collide_row(f: &mut [[f64; Q]], rho: &mut [f64], ux: &mut [f64], uy: &mut [f64], omega: f64) {
    let nx = f.len();
    for x in 1..nx - 1 {
        let (r, u, v) = collide_cell(&mut f[x], omega);
        rho[x] = r;
        ux[x] = u;
        uy[x] = v;
    }
}

/// Collide every interior cell. Each cell only reads its own populations, so
/// rows run in parallel; the join at the end of the sweep orders all writes
/// before streaming starts.
pub fn collide(state: &mut LatticeState, omega: f64) {
    let lat = state.lattice;
    let (nx, ny) = (lat.x_dim(), lat.y_dim());
    let LatticeState { f, rho, ux, uy, .. } = state;

    if lat.size() >= PAR_MIN_CELLS {
        f.par_chunks_mut(nx)
            .zip(rho.par_chunks_mut(nx))
            .zip(ux.par_chunks_mut(nx))
            .zip(uy.par_chunks_mut(nx))
            .skip(1)
            .take(ny - 2)
            .for_each(|(((f_row, rho_row), ux_row), uy_row)| {
                collide_row(f_row, rho_row, ux_row, uy_row, omega);
            });
    } else {
        for (((f_row, rho_row), ux_row), uy_row) in f
            .chunks_mut(nx)
            .zip(rho.chunks_mut(nx))
            .zip(ux.chunks_mut(nx))
            .zip(uy.chunks_mut(nx))
            .skip(1)
            .take(ny - 2)
        {
            collide_row(f_row, rho_row, ux_row, uy_row, omega);
        }
    }
}

/// Shift one direction's populations a single lattice step, in place.
///
/// Rows and columns are walked against the direction of travel (northward
/// slots from the top row down, eastward slots from the right column in, and
/// so on), so each source cell is read before it is overwritten.
fn shift(state: &mut LatticeState, dir: usize) {
    let lat = state.lattice;
    let (nx, ny) = (lat.x_dim(), lat.y_dim());
    let [ex, ey] = VELOCITIES[dir];
    for j in 1..ny - 1 {
        let y = if ey > 0 { ny - 1 - j } else { j };
        for i in 1..nx - 1 {
            let x = if ex > 0 { nx - 1 - i } else { i };
            let src = lat.idx_inner(offset(x, -ex), offset(y, -ey));
            let dst = lat.idx_inner(x, y);
            state.f[dst][dir] = state.f[src][dir];
        }
    }
}

/// Stream all eight moving populations into the interior cells.
pub fn stream(state: &mut LatticeState) {
    for dir in 1..Q {
        shift(state, dir);
    }
}

/// No-slip walls: every population that streamed into a barrier cell is sent
/// back out to the neighbour it came from, in the reversed slot.
pub fn bounce_back(state: &mut LatticeState) {
    let lat = state.lattice;
    for y in 1..lat.y_dim() - 1 {
        for x in 1..lat.x_dim() - 1 {
            let i = lat.idx_inner(x, y);
            if !state.barrier[i] {
                continue;
            }
            let cell = state.f[i];
            for dir in 1..Q {
                let [ex, ey] = VELOCITIES[dir];
                let n = lat.idx_inner(offset(x, ex), offset(y, ey));
                state.f[n][dir] = cell[OPPOSITE[dir]];
            }
        }
    }
}

/// Recompute density and velocity from the current populations.
pub fn update_macroscopic(state: &mut LatticeState) {
    let LatticeState { f, rho, ux, uy, .. } = state;
    for (i, cell) in f.iter().enumerate() {
        let (r, u, v) = d2q9::moments(cell);
        rho[i] = r;
        ux[i] = u;
        uy[i] = v;
    }
}

/// `curl = duy/dx - dux/dy` by central differences (unscaled), interior only.
pub fn update_curl(state: &mut LatticeState) {
    let lat = state.lattice;
    for y in 1..lat.y_dim() - 1 {
        for x in 1..lat.x_dim() - 1 {
            let i = lat.idx_inner(x, y);
            state.curl[i] = state.uy[lat.idx_inner(x + 1, y)] - state.uy[lat.idx_inner(x - 1, y)]
                - state.ux[lat.idx_inner(x, y + 1)]
                + state.ux[lat.idx_inner(x, y - 1)];
        }
    }
}
