use crate::solver::Simulation;

/// Solid shapes rasterised onto the lattice through `Simulation::add_barrier`.
/// Cells outside the guard band are skipped silently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Obstacle {
    /// Vertical segment covering `y_center - half_height ..= y_center + half_height`.
    VerticalLine { x: usize, y_center: usize, half_height: usize },
    /// Filled disc of cells whose centres lie within `radius` of `(cx, cy)`.
    Circle { cx: f64, cy: f64, radius: f64 },
}

impl Obstacle {
    /// Vertical line a third of the way across, centred vertically.
    pub fn default_line(x_dim: usize, y_dim: usize, half_height: usize) -> Self {
        Obstacle::VerticalLine { x: x_dim / 3, y_center: y_dim / 2, half_height }
    }

    /// Disc a third of the way across, centred vertically.
    pub fn default_circle(x_dim: usize, y_dim: usize, radius: f64) -> Self {
        Obstacle::Circle { cx: (x_dim / 3) as f64, cy: (y_dim / 2) as f64, radius }
    }

    /// Cells covered by the shape, clipped to `x_dim`×`y_dim`.
    pub fn cells(&self, x_dim: usize, y_dim: usize) -> Vec<(usize, usize)> {
        match *self {
            Obstacle::VerticalLine { x, y_center, half_height } => {
                if x >= x_dim {
                    return Vec::new();
                }
                let lo = y_center.saturating_sub(half_height);
                let hi = (y_center + half_height).min(y_dim.saturating_sub(1));
                (lo..=hi).map(|y| (x, y)).collect()
            }
            Obstacle::Circle { cx, cy, radius } => {
                let r2 = radius * radius;
                let mut cells = Vec::new();
                for y in 0..y_dim {
                    for x in 0..x_dim {
                        let dx = x as f64 - cx;
                        let dy = y as f64 - cy;
                        if dx * dx + dy * dy <= r2 {
                            cells.push((x, y));
                        }
                    }
                }
                cells
            }
        }
    }

    pub fn apply(&self, sim: &mut Simulation) {
        let cells = self.cells(sim.x_dim(), sim.y_dim());
        log::debug!("placing {:?} over {} cells", self, cells.len());
        for (x, y) in cells {
            sim.add_barrier(x, y);
        }
    }
}
