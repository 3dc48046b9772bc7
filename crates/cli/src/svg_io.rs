//! SVG exports: quadratic Bezier paths for splines, polygons for the grid.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use depixel::bspline::Point2;
use depixel::pipeline::Vectorized;

use crate::bitmap::Rgb;
use crate::png_io::{shape_splines, GRID_COLOUR, PIXEL_SCALE};

/// Plain white shapes are omitted from SVG output.
const WHITE: Rgb = [255, 255, 255];

pub struct SvgWriter<'a> {
    data: &'a Vectorized<Rgb>,
    scale: i32,
}

impl<'a> SvgWriter<'a> {
    pub fn new(data: &'a Vectorized<Rgb>) -> Self {
        Self {
            data,
            scale: PIXEL_SCALE,
        }
    }

    fn out_file(outdir: &Path, kind: &str, name: &str) -> PathBuf {
        outdir.join(format!("{kind}_{name}.svg"))
    }

    fn scale_pt(&self, p: Point2) -> (i32, i32) {
        (
            (p.x * f64::from(self.scale)).round() as i32,
            (p.y * f64::from(self.scale)).round() as i32,
        )
    }

    fn document(&self, body: String) -> String {
        let w = self.data.pixels.width() as i32 * self.scale + 1;
        let h = self.data.pixels.height() as i32 * self.scale + 1;
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n"
        )
    }

    /// One rect per input pixel.
    pub fn export_pixels(&self, outdir: &Path, name: &str) -> Result<()> {
        let mut body = String::new();
        let pixels = &self.data.pixels;
        for y in 0..pixels.height() {
            for x in 0..pixels.width() {
                let value = *pixels.value(pixels.id(x, y));
                writeln!(
                    body,
                    "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                     stroke=\"{}\" fill=\"{}\"/>",
                    x as i32 * self.scale,
                    y as i32 * self.scale,
                    self.scale,
                    self.scale,
                    rgb(value),
                    rgb(value),
                )?;
            }
        }
        fs::write(Self::out_file(outdir, "pixels", name), self.document(body))?;
        Ok(())
    }

    /// Deformed cell polygons filled with their pixel values.
    pub fn export_grid(&self, outdir: &Path, name: &str) -> Result<()> {
        let mut body = String::new();
        let pixels = &self.data.pixels;
        for y in 0..pixels.height() {
            for x in 0..pixels.width() {
                let polygon = self.data.cell_polygon(x, y)?;
                let points: Vec<String> = polygon
                    .iter()
                    .map(|n| {
                        let (px, py) = self.scale_pt(n.to_point());
                        format!("{px},{py}")
                    })
                    .collect();
                writeln!(
                    body,
                    "  <polygon points=\"{}\" stroke=\"{}\" fill=\"{}\"/>",
                    points.join(" "),
                    rgb(GRID_COLOUR),
                    rgb(*pixels.value(pixels.id(x, y))),
                )?;
            }
        }
        fs::write(Self::out_file(outdir, "grid", name), self.document(body))?;
        Ok(())
    }

    pub fn export_shapes(&self, outdir: &Path, name: &str) -> Result<()> {
        self.export_spline_drawing(outdir, "shapes", name, false)
    }

    pub fn export_smooth(&self, outdir: &Path, name: &str) -> Result<()> {
        self.export_spline_drawing(outdir, "smooth", name, true)
    }

    /// One `<path>` per shape: every boundary spline decomposed into its
    /// quadratic Bezier segments as `M`/`Q` commands.
    fn export_spline_drawing(
        &self,
        outdir: &Path,
        kind: &str,
        name: &str,
        smoothed: bool,
    ) -> Result<()> {
        let mut body = String::new();
        for shape in &self.data.shapes {
            if shape.value == WHITE {
                continue;
            }
            let mut d = String::new();
            for spline in shape_splines(self.data, shape, smoothed)? {
                let segments = spline.quadratic_bezier_segments()?;
                let (sx, sy) = self.scale_pt(segments[0][0]);
                write!(d, "M {sx} {sy} ")?;
                for segment in &segments {
                    let (cx, cy) = self.scale_pt(segment[1]);
                    let (ex, ey) = self.scale_pt(segment[2]);
                    write!(d, "Q {cx} {cy} {ex} {ey} ")?;
                }
                write!(d, "Z ")?;
            }
            writeln!(
                body,
                "  <path d=\"{}\" stroke=\"{}\" fill=\"{}\"/>",
                d.trim_end(),
                rgb(GRID_COLOUR),
                rgb(shape.value),
            )?;
        }
        fs::write(Self::out_file(outdir, kind, name), self.document(body))?;
        Ok(())
    }
}

fn rgb(colour: Rgb) -> String {
    format!("rgb({},{},{})", colour[0], colour[1], colour[2])
}
