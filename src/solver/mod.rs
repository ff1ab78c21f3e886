mod boundary;
pub mod d2q9;
pub mod diagnostics;
mod kernels;
mod params;

// Re-export public API
pub use boundary::Outflow;
pub use params::SimParams;

use crate::error::{EngineError, Result};
use crate::field::FlowField;
use crate::state::{Lattice, LatticeState};

/// Lattice Boltzmann engine: owns the lattice state and advances it.
///
/// Constructed once, then driven by alternating `simulate()` with reads of
/// `barrier`/`curl`. Not meant for concurrent use; every call runs to
/// completion on the caller's thread (collide fans out over rayon internally).
pub struct Simulation {
    state: LatticeState,
    params: SimParams,
    step_count: u64,
}

impl Simulation {
    /// Build an engine in uniform rightward flow at `speed`, density 1, with
    /// no barriers and zero curl.
    pub fn new(x_dim: usize, y_dim: usize, speed: f64, steps: u32, viscosity: f64) -> Result<Self> {
        let params = SimParams { speed, steps, viscosity, ..SimParams::default() };
        Self::with_params(x_dim, y_dim, params)
    }

    pub fn with_params(x_dim: usize, y_dim: usize, params: SimParams) -> Result<Self> {
        let lattice = Lattice::new(x_dim, y_dim)?;
        params.validate()?;
        log::debug!(
            "lattice {}x{}: speed={} steps={} viscosity={} omega={:.4}",
            x_dim,
            y_dim,
            params.speed,
            params.steps,
            params.viscosity,
            params.omega()
        );
        Ok(Self {
            state: LatticeState::new_uniform(lattice, 1.0, params.speed, 0.0),
            params,
            step_count: 0,
        })
    }

    /// Advance `steps` full iterations, then check the lattice for collapse.
    ///
    /// On `NumericalInstability` the corrupted state is kept; call `reset()`
    /// to recover or drop the engine.
    pub fn simulate(&mut self) -> Result<()> {
        let omega = self.params.omega();
        for _ in 0..self.params.steps {
            boundary::force_inflow(&mut self.state, self.params.speed);
            kernels::collide(&mut self.state, omega);
            self.params.outflow.apply(&mut self.state);
            kernels::stream(&mut self.state);
            kernels::bounce_back(&mut self.state);
            kernels::update_macroscopic(&mut self.state);
            kernels::update_curl(&mut self.state);
            self.step_count += 1;
        }
        self.check_stability()
    }

    fn check_stability(&self) -> Result<()> {
        match diagnostics::find_unstable_cell(&self.state) {
            None => Ok(()),
            Some(i) => {
                let (x, y) = self.state.lattice.coords(i);
                let rho = self.state.rho[i];
                log::warn!("lattice went unstable at ({x}, {y}) after {} steps, rho={rho}", self.step_count);
                Err(EngineError::NumericalInstability { x, y, step: self.step_count, rho })
            }
        }
    }

    /// Return the fluid to uniform inflow at the current speed. Barriers stay.
    pub fn reset(&mut self) {
        self.state.reset_fluid(1.0, self.params.speed, 0.0);
        self.step_count = 0;
    }

    pub fn x_dim(&self) -> usize {
        self.state.lattice.x_dim()
    }

    pub fn y_dim(&self) -> usize {
        self.state.lattice.y_dim()
    }

    /// Whether `(x, y)` is solid.
    ///
    /// # Panics
    /// If `(x, y)` is outside the lattice.
    pub fn barrier(&self, x: usize, y: usize) -> bool {
        self.state.barrier[self.state.lattice.idx(x, y)]
    }

    /// Vorticity at `(x, y)`; zero on the outer ring.
    ///
    /// # Panics
    /// If `(x, y)` is outside the lattice.
    pub fn curl(&self, x: usize, y: usize) -> f64 {
        self.state.curl[self.state.lattice.idx(x, y)]
    }

    pub fn try_barrier(&self, x: usize, y: usize) -> Result<bool> {
        Ok(self.state.barrier[self.state.lattice.checked_idx(x, y)?])
    }

    pub fn try_curl(&self, x: usize, y: usize) -> Result<f64> {
        Ok(self.state.curl[self.state.lattice.checked_idx(x, y)?])
    }

    pub fn density(&self, x: usize, y: usize) -> f64 {
        self.state.rho[self.state.lattice.idx(x, y)]
    }

    pub fn velocity(&self, x: usize, y: usize) -> (f64, f64) {
        let i = self.state.lattice.idx(x, y);
        (self.state.ux[i], self.state.uy[i])
    }

    /// Row-major curl values, `x + y * x_dim`.
    pub fn curl_field(&self) -> &[f64] {
        &self.state.curl
    }

    /// Row-major barrier flags, `x + y * x_dim`.
    pub fn barrier_mask(&self) -> &[bool] {
        &self.state.barrier
    }

    /// Mark `(x, y)` solid. Ignored outside the guard band.
    pub fn add_barrier(&mut self, x: usize, y: usize) {
        let lat = self.state.lattice;
        if lat.in_guard_band(x, y) {
            self.state.barrier[lat.idx_inner(x, y)] = true;
        }
    }

    /// Clear the solid flag at `(x, y)`. Ignored outside the guard band.
    pub fn remove_barrier(&mut self, x: usize, y: usize) {
        let lat = self.state.lattice;
        if lat.in_guard_band(x, y) {
            self.state.barrier[lat.idx_inner(x, y)] = false;
        }
    }

    pub fn clear_barriers(&mut self) {
        self.state.barrier.fill(false);
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        params::validate_speed(speed)?;
        self.params.speed = speed;
        Ok(())
    }

    pub fn set_steps(&mut self, steps: u32) {
        self.params.steps = steps;
    }

    pub fn set_viscosity(&mut self, viscosity: f64) -> Result<()> {
        params::validate_viscosity(viscosity)?;
        self.params.viscosity = viscosity;
        Ok(())
    }

    pub fn set_outflow(&mut self, outflow: Outflow) {
        self.params.outflow = outflow;
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn omega(&self) -> f64 {
        self.params.omega()
    }

    /// LBM iterations run since construction or the last `reset()`.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn total_mass(&self) -> f64 {
        diagnostics::total_mass(&self.state)
    }

    pub fn kinetic_energy(&self) -> f64 {
        diagnostics::kinetic_energy(&self.state)
    }

    pub fn max_speed(&self) -> f64 {
        diagnostics::max_speed(&self.state)
    }
}

impl FlowField for Simulation {
    fn x_dim(&self) -> usize {
        Simulation::x_dim(self)
    }

    fn y_dim(&self) -> usize {
        Simulation::y_dim(self)
    }

    fn barrier(&self, x: usize, y: usize) -> bool {
        Simulation::barrier(self, x, y)
    }

    fn curl(&self, x: usize, y: usize) -> f64 {
        Simulation::curl(self, x, y)
    }
}
