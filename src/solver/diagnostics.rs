use crate::state::LatticeState;

/// Sum of all populations over the lattice.
pub fn total_mass(state: &LatticeState) -> f64 {
    state.f.iter().map(|cell| cell.iter().sum::<f64>()).sum()
}

/// Volume-averaged kinetic energy over interior cells: `0.5 * <rho |u|^2>`.
pub fn kinetic_energy(state: &LatticeState) -> f64 {
    let lat = state.lattice;
    let mut sum = 0.0;
    let mut count = 0usize;
    for y in 1..lat.y_dim() - 1 {
        for x in 1..lat.x_dim() - 1 {
            let i = lat.idx_inner(x, y);
            sum += state.rho[i] * (state.ux[i] * state.ux[i] + state.uy[i] * state.uy[i]);
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

pub fn max_speed(state: &LatticeState) -> f64 {
    state
        .ux
        .iter()
        .zip(&state.uy)
        .map(|(u, v)| (u * u + v * v).sqrt())
        .fold(0.0_f64, f64::max)
}

/// First cell whose density is non-finite or non-positive, or whose velocity
/// is non-finite.
pub fn find_unstable_cell(state: &LatticeState) -> Option<usize> {
    (0..state.rho.len()).find(|&i| {
        let rho = state.rho[i];
        !(rho.is_finite() && rho > 0.0 && state.ux[i].is_finite() && state.uy[i].is_finite())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Lattice;

    #[test]
    fn test_total_mass_uniform() {
        let state = LatticeState::new_uniform(Lattice::new(10, 8).unwrap(), 1.0, 0.1, 0.0);
        let m = total_mass(&state);
        assert!((m - 80.0).abs() < 1e-10, "mass should equal cell count, got {}", m);
    }

    #[test]
    fn test_kinetic_energy_zero() {
        let state = LatticeState::new_uniform(Lattice::new(10, 8).unwrap(), 1.0, 0.0, 0.0);
        assert!(kinetic_energy(&state).abs() < 1e-15);
    }

    #[test]
    fn test_kinetic_energy_uniform_flow() {
        let state = LatticeState::new_uniform(Lattice::new(10, 8).unwrap(), 1.0, 0.1, 0.0);
        let ke = kinetic_energy(&state);
        assert!((ke - 0.005).abs() < 1e-12, "KE should be 0.5 * 0.1^2, got {}", ke);
    }

    #[test]
    fn test_max_speed() {
        let lat = Lattice::new(6, 6).unwrap();
        let mut state = LatticeState::new_uniform(lat, 1.0, 0.1, 0.0);
        let i = lat.idx(3, 2);
        state.ux[i] = 0.3;
        state.uy[i] = 0.4;
        assert!((max_speed(&state) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_find_unstable_cell() {
        let lat = Lattice::new(6, 6).unwrap();
        let mut state = LatticeState::new_uniform(lat, 1.0, 0.1, 0.0);
        assert_eq!(find_unstable_cell(&state), None);

        state.uy[lat.idx(4, 1)] = f64::NAN;
        state.rho[lat.idx(2, 3)] = 0.0;
        assert_eq!(find_unstable_cell(&state), Some(lat.idx(4, 1)));

        state.uy[lat.idx(4, 1)] = 0.0;
        assert_eq!(find_unstable_cell(&state), Some(lat.idx(2, 3)));
    }
}
