//! Rectangular pixel storage.
//!
//! Pixel values are opaque to the rest of the crate; similarity is decided
//! by a caller-supplied predicate, never by inspecting values here.

use crate::error::{Error, Result};

/// Row-major rectangular grid of pixel values.
///
/// Coordinates are `(x, y)` with x increasing rightward and y downward.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid<V> {
    width: usize,
    height: usize,
    pixels: Vec<V>,
}

impl<V> PixelGrid<V> {
    /// Build a grid from rows. Rejects empty and ragged input.
    pub fn from_rows(rows: Vec<Vec<V>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(Error::OutOfBounds("pixel data must be non-empty".into()));
        }
        let mut pixels = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return Err(Error::OutOfBounds(format!(
                    "ragged row: expected {} pixels, got {}",
                    width,
                    row.len()
                )));
            }
            pixels.extend(row);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pixel value at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Result<&V> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds(format!(
                "pixel ({x}, {y}) outside a {}x{} grid",
                self.width, self.height
            )));
        }
        Ok(&self.pixels[y * self.width + x])
    }

    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> &V {
        &self.pixels[y * self.width + x]
    }

    /// Row-major coordinate walk.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }
}
