//! PNG raster input and bitmap exports of the pipeline stages.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use depixel::bspline::{ClosedBSpline, Point2};
use depixel::pipeline::Vectorized;
use depixel::raster::PixelGrid;
use depixel::shapes::Shape;

use crate::bitmap::{Bitmap, Rgb};

pub const PIXEL_SCALE: i32 = 40;
pub const GRID_COLOUR: Rgb = [255, 127, 0];
const BACKGROUND: Rgb = [127, 127, 127];

/// Line segments per quadratic Bezier span when rasterizing splines.
const CURVE_STEPS: usize = 16;

/// Decode a PNG into RGB triples, expanding palette and grayscale data and
/// discarding any alpha channel.
pub fn read_png(path: &Path) -> Result<PixelGrid<Rgb>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];
    let stride = match info.color_type {
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        other => bail!("unsupported PNG colour type {other:?}"),
    };
    let (width, height) = (info.width as usize, info.height as usize);
    let mut rows = Vec::with_capacity(height);
    for y in 0..height {
        let mut row = Vec::with_capacity(width);
        for x in 0..width {
            let offset = (y * width + x) * stride;
            let px = &bytes[offset..offset + stride];
            row.push(match stride {
                1 | 2 => [px[0], px[0], px[0]],
                _ => [px[0], px[1], px[2]],
            });
        }
        rows.push(row);
    }
    Ok(PixelGrid::from_rows(rows)?)
}

/// Writes the pipeline stages as scaled PNG drawings.
pub struct PngWriter<'a> {
    data: &'a Vectorized<Rgb>,
    scale: i32,
    draw_nodes: bool,
}

impl<'a> PngWriter<'a> {
    pub fn new(data: &'a Vectorized<Rgb>, draw_nodes: bool) -> Self {
        Self {
            data,
            scale: PIXEL_SCALE,
            draw_nodes,
        }
    }

    fn out_file(outdir: &Path, kind: &str, name: &str) -> PathBuf {
        outdir.join(format!("{kind}_{name}.png"))
    }

    fn scale_pt(&self, p: Point2, offset: (f64, f64)) -> (i32, i32) {
        (
            ((p.x + offset.0) * f64::from(self.scale)).round() as i32,
            ((p.y + offset.1) * f64::from(self.scale)).round() as i32,
        )
    }

    fn drawing(&self) -> Bitmap {
        let w = self.data.pixels.width() as i32 * self.scale + 1;
        let h = self.data.pixels.height() as i32 * self.scale + 1;
        Bitmap::new(w as usize, h as usize, BACKGROUND)
    }

    /// The raw raster, one image pixel per input pixel.
    pub fn export_pixels(&self, outdir: &Path, name: &str) -> Result<()> {
        let (w, h) = (self.data.pixels.width(), self.data.pixels.height());
        let mut bitmap = Bitmap::new(w, h, BACKGROUND);
        for y in 0..h {
            for x in 0..w {
                let value = *self.data.pixels.value(self.data.pixels.id(x, y));
                bitmap.set_pixel(x as i32, y as i32, value);
            }
        }
        bitmap.write_png(&Self::out_file(outdir, "pixels", name))
    }

    /// The deformed pixel-cell grid, each cell filled with its value.
    pub fn export_grid(&self, outdir: &Path, name: &str) -> Result<()> {
        let mut bitmap = self.drawing();
        for y in 0..self.data.pixels.height() {
            for x in 0..self.data.pixels.width() {
                let polygon = self.data.cell_polygon(x, y)?;
                let points: Vec<(i32, i32)> = polygon
                    .iter()
                    .map(|n| self.scale_pt(n.to_point(), (0.0, 0.0)))
                    .collect();
                let mut previous = points[points.len() - 1];
                for &point in &points {
                    bitmap.draw_line(previous, point, GRID_COLOUR);
                    previous = point;
                }
                let value = *self.data.pixels.value(self.data.pixels.id(x, y));
                let centre = (
                    points.iter().map(|p| p.0).sum::<i32>() / points.len() as i32,
                    points.iter().map(|p| p.1).sum::<i32>() / points.len() as i32,
                );
                bitmap.fill(centre, value);
            }
        }
        if self.draw_nodes {
            self.draw_node_graph(&mut bitmap);
        }
        bitmap.write_png(&Self::out_file(outdir, "grid", name))
    }

    /// Fitted spline shapes.
    pub fn export_shapes(&self, outdir: &Path, name: &str) -> Result<()> {
        self.export_spline_drawing(outdir, "shapes", name, false)
    }

    /// Smoothed spline shapes.
    pub fn export_smooth(&self, outdir: &Path, name: &str) -> Result<()> {
        self.export_spline_drawing(outdir, "smooth", name, true)
    }

    fn export_spline_drawing(
        &self,
        outdir: &Path,
        kind: &str,
        name: &str,
        smoothed: bool,
    ) -> Result<()> {
        let mut bitmap = self.drawing();
        for shape in &self.data.shapes {
            for spline in shape_splines(self.data, shape, smoothed)? {
                self.draw_spline(&mut bitmap, &spline)?;
            }
            // Fill from the first member cell's centre: unlike the polygon
            // centroid it is guaranteed to sit inside the shape.
            let (px, py) = shape.pixels[0];
            let centre = self.scale_pt(
                Point2::new(f64::from(px), f64::from(py)),
                (0.5, 0.5),
            );
            bitmap.fill(centre, shape.value);
        }
        if self.draw_nodes {
            self.draw_node_graph(&mut bitmap);
        }
        bitmap.write_png(&Self::out_file(outdir, kind, name))
    }

    fn draw_spline(&self, bitmap: &mut Bitmap, spline: &ClosedBSpline) -> Result<()> {
        for segment in spline.quadratic_bezier_segments()? {
            let mut previous = self.scale_pt(segment[0], (0.0, 0.0));
            for step in 1..=CURVE_STEPS {
                let t = step as f64 / CURVE_STEPS as f64;
                let s = 1.0 - t;
                let point = segment[0] * (s * s)
                    + segment[1] * (2.0 * s * t)
                    + segment[2] * (t * t);
                let point = self.scale_pt(point, (0.0, 0.0));
                bitmap.draw_line(previous, point, GRID_COLOUR);
                previous = point;
            }
        }
        Ok(())
    }

    fn draw_node_graph(&self, bitmap: &mut Bitmap) {
        let pixels = &self.data.pixels;
        for a in pixels.ids() {
            for &b in pixels.neighbors(a) {
                if b <= a {
                    continue;
                }
                let (ax, ay) = pixels.coord(a);
                let (bx, by) = pixels.coord(b);
                let colour = node_colour(*pixels.value(a));
                bitmap.draw_line(
                    self.scale_pt(Point2::new(f64::from(ax), f64::from(ay)), (0.5, 0.5)),
                    self.scale_pt(Point2::new(f64::from(bx), f64::from(by)), (0.5, 0.5)),
                    colour,
                );
            }
        }
    }
}

/// A shape's boundary splines: the outer loop reversed so its orientation
/// opposes the holes, then the holes.
pub fn shape_splines(
    data: &Vectorized<Rgb>,
    shape: &Shape<Rgb>,
    smoothed: bool,
) -> Result<Vec<ClosedBSpline>> {
    let pick = |id: depixel::shapes::PathId| -> Result<ClosedBSpline> {
        let path = &data.paths[id.0];
        Ok(if smoothed {
            path.smooth
                .clone()
                .with_context(|| format!("path {} was never smoothed", id.0))?
        } else {
            path.spline.clone()
        })
    };
    let mut splines = vec![pick(shape.outer)?.reversed()];
    for &hole in &shape.holes {
        splines.push(pick(hole)?);
    }
    Ok(splines)
}

fn node_colour(value: Rgb) -> Rgb {
    match value {
        [255, 255, 255] => [0, 0, 255],
        [127, 127, 127] => [191, 0, 0],
        _ => [0, 191, 0],
    }
}
