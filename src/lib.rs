//! 2D lattice Boltzmann (D2Q9) flow around obstacles, exposing per-cell
//! vorticity and solid flags for visualization.

pub mod config;
pub mod error;
pub mod field;
pub mod obstacle;
pub mod renderer;
pub mod solver;
pub mod state;

pub use error::{EngineError, Result};
pub use field::FlowField;
pub use obstacle::Obstacle;
pub use solver::{Outflow, SimParams, Simulation};
