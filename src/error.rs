use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("lattice {x_dim}x{y_dim} is too small: both dimensions must be at least {min}")]
    LatticeTooSmall { x_dim: usize, y_dim: usize, min: usize },

    #[error("cell ({x}, {y}) is outside the {x_dim}x{y_dim} lattice")]
    OutOfBounds { x: usize, y: usize, x_dim: usize, y_dim: usize },

    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    #[error("numerical instability at cell ({x}, {y}) after {step} steps (rho = {rho})")]
    NumericalInstability { x: usize, y: usize, step: u64, rho: f64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
