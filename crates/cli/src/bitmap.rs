//! In-memory RGB bitmap with the drawing primitives the PNG exports need.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

pub type Rgb = [u8; 3];

pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, colour: Rgb) {
        if self.in_bounds(x, y) {
            self.pixels[y as usize * self.width + x as usize] = colour;
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.in_bounds(x, y)
            .then(|| self.pixels[y as usize * self.width + x as usize])
    }

    /// Bresenham's line algorithm.
    pub fn draw_line(&mut self, p0: (i32, i32), p1: (i32, i32), colour: Rgb) {
        let (mut x0, mut y0) = p0;
        let (x1, y1) = p1;
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        while (x0, y0) != (x1, y1) {
            self.set_pixel(x0, y0, colour);
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
        self.set_pixel(x1, y1, colour);
    }

    /// Flood fill the region of `start`'s colour, 4-connected.
    pub fn fill(&mut self, start: (i32, i32), colour: Rgb) {
        let Some(from) = self.pixel(start.0, start.1) else {
            return;
        };
        if from == colour {
            return;
        }
        let mut stack = vec![start];
        while let Some((x, y)) = stack.pop() {
            self.set_pixel(x, y, colour);
            for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                if self.pixel(nx, ny) == Some(from) {
                    stack.push((nx, ny));
                }
            }
        }
    }

    pub fn write_png(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut encoder =
            png::Encoder::new(BufWriter::new(file), self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        let flat: Vec<u8> = self.pixels.iter().flatten().copied().collect();
        writer.write_image_data(&flat)?;
        Ok(())
    }
}
