use serde::Deserialize;

use super::d2q9::{NW, SW, W};
use crate::state::LatticeState;

/// Right-edge outflow treatment, applied at the end of the collide phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outflow {
    /// Zero-gradient: copy the west-moving populations (W, NW, SW) from the
    /// column at `x_dim - 2` onto the edge, interior rows only.
    #[default]
    CopyInward,
    /// Leave the forced inflow equilibrium on the right edge.
    Fixed,
}

impl Outflow {
    pub fn apply(self, state: &mut LatticeState) {
        match self {
            Outflow::CopyInward => copy_inward(state),
            Outflow::Fixed => {}
        }
    }
}

fn copy_inward(state: &mut LatticeState) {
    let lat = state.lattice;
    let edge = lat.x_dim() - 1;
    for y in 1..lat.y_dim() - 1 {
        let dst = lat.idx_inner(edge, y);
        let src = lat.idx_inner(edge - 1, y);
        for dir in [W, NW, SW] {
            state.f[dst][dir] = state.f[src][dir];
        }
    }
}

/// Reset every edge cell to the equilibrium of uniform flow `(speed, 0)` at
/// unit density: a constant-velocity inflow on all four borders.
pub fn force_inflow(state: &mut LatticeState, speed: f64) {
    let lat = state.lattice;
    let (nx, ny) = (lat.x_dim(), lat.y_dim());
    for x in 0..nx {
        state.set_equilibrium(lat.idx_inner(x, 0), 1.0, speed, 0.0);
        state.set_equilibrium(lat.idx_inner(x, ny - 1), 1.0, speed, 0.0);
    }
    for y in 1..ny - 1 {
        state.set_equilibrium(lat.idx_inner(0, y), 1.0, speed, 0.0);
        state.set_equilibrium(lat.idx_inner(nx - 1, y), 1.0, speed, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::d2q9::{self, E, N, NE, Q, REST, S, SE};
    use crate::state::Lattice;

    fn still_state(nx: usize, ny: usize) -> LatticeState {
        LatticeState::new_uniform(Lattice::new(nx, ny).unwrap(), 1.0, 0.0, 0.0)
    }

    #[test]
    fn test_force_inflow_sets_all_edges() {
        let mut state = still_state(8, 6);
        let lat = state.lattice;
        force_inflow(&mut state, 0.1);
        let eq = d2q9::equilibrium(1.0, 0.1, 0.0);
        for y in 0..6 {
            for x in 0..8 {
                let i = lat.idx(x, y);
                if lat.is_interior(x, y) {
                    assert_eq!(state.ux[i], 0.0, "interior ({x},{y}) must be untouched");
                } else {
                    assert_eq!(state.f[i], eq, "edge ({x},{y})");
                    assert_eq!(state.ux[i], 0.1);
                    assert_eq!(state.rho[i], 1.0);
                }
            }
        }
    }

    #[test]
    fn test_copy_inward_moves_only_west_slots() {
        let mut state = still_state(7, 6);
        let lat = state.lattice;
        for y in 0..6 {
            let src = lat.idx(5, y);
            state.f[src] = std::array::from_fn(|d| (y * 10 + d) as f64);
        }
        let before: Vec<[f64; Q]> = state.f.clone();
        Outflow::CopyInward.apply(&mut state);

        for y in 0..6 {
            let dst = lat.idx(6, y);
            let src = lat.idx(5, y);
            if y == 0 || y == 5 {
                assert_eq!(state.f[dst], before[dst], "corner row {y} must be untouched");
                continue;
            }
            for dir in [W, NW, SW] {
                assert_eq!(state.f[dst][dir], before[src][dir]);
            }
            for dir in [REST, E, N, S, NE, SE] {
                assert_eq!(state.f[dst][dir], before[dst][dir]);
            }
        }
    }

    #[test]
    fn test_fixed_outflow_is_noop() {
        let mut state = still_state(7, 6);
        let lat = state.lattice;
        state.f[lat.idx(5, 2)] = [0.3; Q];
        let before = state.f.clone();
        Outflow::Fixed.apply(&mut state);
        assert_eq!(state.f, before);
    }

    #[test]
    fn test_outflow_deserialize() {
        let o: Outflow = serde_yaml::from_str("copy_inward").unwrap();
        assert_eq!(o, Outflow::CopyInward);
        let o: Outflow = serde_yaml::from_str("fixed").unwrap();
        assert_eq!(o, Outflow::Fixed);
    }
}
