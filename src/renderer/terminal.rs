use std::io::{self, Write};

use super::color::{ColorMap, Palette};
use crate::field::FlowField;

/// ANSI true-colour renderer: one coloured space per lattice cell, top row
/// of the terminal is the highest lattice row.
pub struct TerminalRenderer {
    contrast: f64,
    palette: Palette,
    frame: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new(contrast: f64, colormap: ColorMap) -> Self {
        Self {
            contrast,
            palette: Palette::new(colormap),
            frame: Vec::new(),
        }
    }

    /// Compose one frame into the internal buffer and write it with a single call.
    pub fn paint(&mut self, out: &mut impl Write, field: &impl FlowField) -> io::Result<()> {
        self.frame.clear();
        self.frame.extend_from_slice(b"\x1b[H"); // cursor home
        for y in (0..field.y_dim()).rev() {
            for x in 0..field.x_dim() {
                let [r, g, b] = if field.barrier(x, y) {
                    [0, 0, 0]
                } else {
                    self.palette.curl_colour(field.curl(x, y), self.contrast)
                };
                write!(self.frame, "\x1b[48;2;{r};{g};{b}m ")?;
            }
            self.frame.extend_from_slice(b"\x1b[0m\n");
        }
        out.write_all(&self.frame)?;
        out.flush()
    }
}
