use std::path::Path;

use serde::Deserialize;

use crate::obstacle::Obstacle;
use crate::renderer::ColorMap;
use crate::solver::{Outflow, SimParams};

pub const DEFAULT_PATH: &str = "lattice-vortex.yaml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lattice: LatticeConfig,
    pub physics: PhysicsConfig,
    pub display: DisplayConfig,
    pub obstacle: ObstacleConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub x_dim: usize,
    pub y_dim: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub speed: f64,
    pub steps: u32,
    pub viscosity: f64,
    pub outflow: Outflow,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub contrast: f64,
    /// Frames to run; 0 runs until interrupted.
    pub frames: u64,
    pub frame_interval_ms: u64,
    pub colormap: ColorMap,
}

/// Initial obstacle, positioned a third of the way across the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ObstacleConfig {
    Line { half_height: usize },
    Circle { radius: f64 },
    None,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self { x_dim: 100, y_dim: 30 }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let p = SimParams::default();
        Self {
            speed: p.speed,
            steps: p.steps,
            viscosity: p.viscosity,
            outflow: p.outflow,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            frames: 100,
            frame_interval_ms: 33,
            colormap: ColorMap::Jet,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        ObstacleConfig::Line { half_height: 8 }
    }
}

impl PhysicsConfig {
    pub fn sim_params(&self) -> SimParams {
        SimParams {
            speed: self.speed,
            steps: self.steps,
            viscosity: self.viscosity,
            outflow: self.outflow,
        }
    }
}

impl ObstacleConfig {
    pub fn obstacle(&self, x_dim: usize, y_dim: usize) -> Option<Obstacle> {
        match *self {
            ObstacleConfig::Line { half_height } => {
                Some(Obstacle::default_line(x_dim, y_dim, half_height))
            }
            ObstacleConfig::Circle { radius } => Some(Obstacle::default_circle(x_dim, y_dim, radius)),
            ObstacleConfig::None => None,
        }
    }
}

pub fn load() -> Config {
    load_from(Path::new(DEFAULT_PATH))
}

pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        log::debug!("{} not found; using defaults", path.display());
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str(&contents) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("failed to parse {}: {e}; using defaults", path.display());
                Config::default()
            }
        },
        Err(e) => {
            log::warn!("failed to read {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}
