//! Pixel buffer type shared by the scanner and the compositor.

use super::Colour;

/// A width × height grid of colours, row-major.
///
/// Produced by a decode step and treated as read-only by the scanner. The
/// compositor takes a buffer by value; handing one over is the explicit
/// opt-in to in-place mutation, so callers keep their reference sheet by
/// cloning first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Colour>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Colour::Transparent; width * height],
        }
    }

    /// Create a buffer from rows of colours.
    ///
    /// All rows must have the same length; an empty row list is a 0x0 buffer.
    pub fn from_rows(rows: Vec<Vec<Colour>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        debug_assert!(rows.iter().all(|r| r.len() == width));
        Self {
            width,
            height,
            pixels: rows.into_iter().flatten().collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the colour at (x, y). Panics if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Colour {
        self.pixels[y * self.width + x]
    }

    /// Set the colour at (x, y). Panics if out of bounds.
    pub fn set(&mut self, x: usize, y: usize, colour: Colour) {
        self.pixels[y * self.width + x] = colour;
    }

    /// Borrow a single row.
    pub fn row(&self, y: usize) -> &[Colour] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Colour]> {
        self.pixels.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// All pixels, row-major, mutable.
    pub fn pixels_mut(&mut self) -> &mut [Colour] {
        &mut self.pixels
    }
}
