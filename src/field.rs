/// Read-only view of a flow lattice, as consumed by renderers.
pub trait FlowField {
    fn x_dim(&self) -> usize;
    fn y_dim(&self) -> usize;
    fn barrier(&self, x: usize, y: usize) -> bool;
    fn curl(&self, x: usize, y: usize) -> f64;
}
