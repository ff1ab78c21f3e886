mod color;
mod terminal;

// Re-export public API
pub use color::{ColorMap, N_COLORS, Palette, colour_index, map_to_rgb};
pub use terminal::TerminalRenderer;

use crate::field::FlowField;

/// Pixel-buffer renderer: each lattice cell becomes a `px_per_cell`-square
/// block of RGBA pixels, with lattice row 0 at the bottom of the image.
pub struct CanvasRenderer {
    contrast: f64,
    px_per_cell: usize,
    palette: Palette,
}

impl CanvasRenderer {
    pub fn new(contrast: f64, px_per_cell: usize, colormap: ColorMap) -> Self {
        Self {
            contrast,
            px_per_cell: px_per_cell.max(1),
            palette: Palette::new(colormap),
        }
    }

    pub fn frame_width(&self, field: &impl FlowField) -> usize {
        field.x_dim() * self.px_per_cell
    }

    pub fn frame_height(&self, field: &impl FlowField) -> usize {
        field.y_dim() * self.px_per_cell
    }

    /// Paint into `buf`, resizing it to `frame_width * frame_height * 4` bytes.
    /// Barrier cells are black; alpha is always opaque.
    pub fn render_into(&self, buf: &mut Vec<u8>, field: &impl FlowField) {
        let (nx, ny) = (field.x_dim(), field.y_dim());
        let px = self.px_per_cell;
        let width = nx * px;
        buf.resize(width * ny * px * 4, 255);

        for y in 0..ny {
            // put y=0 at the bottom
            let row = ny - 1 - y;
            for x in 0..nx {
                let [r, g, b] = if field.barrier(x, y) {
                    [0, 0, 0]
                } else {
                    self.palette.curl_colour(field.curl(x, y), self.contrast)
                };
                for py in row * px..(row + 1) * px {
                    let start = (py * width + x * px) * 4;
                    for pixel in buf[start..start + px * 4].chunks_exact_mut(4) {
                        pixel.copy_from_slice(&[r, g, b, 255]);
                    }
                }
            }
        }
    }

    pub fn render(&self, field: &impl FlowField) -> Vec<u8> {
        let mut buf = Vec::new();
        self.render_into(&mut buf, field);
        buf
    }
}
