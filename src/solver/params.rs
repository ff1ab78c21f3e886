use super::boundary::Outflow;
use super::d2q9::SOUND_SPEED;
use crate::error::{EngineError, Result};

/// Solver parameters. Changes apply from the next `simulate()` call; existing
/// populations are not re-equilibrated.
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    /// Inflow velocity imposed on all four edges (lattice units).
    pub speed: f64,
    /// Full LBM iterations per `simulate()` call.
    pub steps: u32,
    /// Kinematic viscosity (lattice units).
    pub viscosity: f64,
    pub outflow: Outflow,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            speed: 0.1,
            steps: 10,
            viscosity: 0.02,
            outflow: Outflow::CopyInward,
        }
    }
}

impl SimParams {
    /// BGK relaxation rate `omega = 1 / (3 nu + 0.5)`.
    pub fn omega(&self) -> f64 {
        omega_for(self.viscosity)
    }

    pub fn validate(&self) -> Result<()> {
        validate_speed(self.speed)?;
        validate_viscosity(self.viscosity)
    }
}

pub fn omega_for(viscosity: f64) -> f64 {
    1.0 / (3.0 * viscosity + 0.5)
}

/// Flow faster than the lattice sound speed cannot be represented by D2Q9.
pub fn validate_speed(speed: f64) -> Result<()> {
    if !speed.is_finite() {
        return Err(EngineError::InvalidParameter {
            name: "speed",
            value: speed,
            reason: "must be finite",
        });
    }
    if speed.abs() >= SOUND_SPEED {
        return Err(EngineError::InvalidParameter {
            name: "speed",
            value: speed,
            reason: "must be below the lattice sound speed 1/sqrt(3)",
        });
    }
    Ok(())
}

/// Positive viscosity keeps omega inside (0, 2).
pub fn validate_viscosity(viscosity: f64) -> Result<()> {
    if !viscosity.is_finite() || viscosity <= 0.0 {
        return Err(EngineError::InvalidParameter {
            name: "viscosity",
            value: viscosity,
            reason: "must be finite and > 0 so that omega lies in (0, 2)",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SimParams::default();
        assert_eq!(params.speed, 0.1);
        assert_eq!(params.steps, 10);
        assert_eq!(params.viscosity, 0.02);
        assert_eq!(params.outflow, Outflow::CopyInward);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_omega_from_viscosity() {
        let params = SimParams { viscosity: 0.02, ..SimParams::default() };
        // 1 / (0.06 + 0.5)
        assert!((params.omega() - 1.0 / 0.56).abs() < 1e-12, "omega={}", params.omega());
        assert!(params.omega() > 0.0 && params.omega() < 2.0);
    }

    #[test]
    fn test_viscosity_bounds() {
        assert!(validate_viscosity(0.005).is_ok());
        assert!(validate_viscosity(0.0).is_err(), "zero viscosity gives omega = 2");
        assert!(validate_viscosity(-0.01).is_err());
        assert!(validate_viscosity(f64::NAN).is_err());
        assert!(validate_viscosity(f64::INFINITY).is_err());
    }

    #[test]
    fn test_speed_bounds() {
        assert!(validate_speed(0.0).is_ok());
        assert!(validate_speed(-0.2).is_ok());
        assert!(validate_speed(0.57).is_ok());
        assert!(validate_speed(0.6).is_err());
        assert!(validate_speed(-0.6).is_err());
        assert!(validate_speed(f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_parameter_names_field() {
        match validate_viscosity(-1.0) {
            Err(EngineError::InvalidParameter { name, value, .. }) => {
                assert_eq!(name, "viscosity");
                assert_eq!(value, -1.0);
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }
}
