use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use depixel::pipeline::{vectorize, DepixelCfg, Vectorized};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::bitmap::Rgb;
use crate::png_io::PngWriter;
use crate::svg_io::SvgWriter;

mod bitmap;
mod png_io;
mod svg_io;

#[derive(Parser)]
#[command(name = "depixel_png")]
#[command(about = "Vectorize pixel-art PNG files into smooth shapes")]
struct Cmd {
    /// Input PNG files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write the raw pixel raster.
    #[arg(long)]
    write_pixels: bool,

    /// Write the deformed pixel-cell grid.
    #[arg(long)]
    write_grid: bool,

    /// Write the fitted spline shapes.
    #[arg(long)]
    write_shapes: bool,

    /// Write the smoothed spline shapes.
    #[arg(long)]
    write_smooth: bool,

    /// Suppress the pixel node-graph overlay in PNG output.
    #[arg(long)]
    no_nodes: bool,

    /// Emit PNG drawings (the default when no format is selected).
    #[arg(long)]
    to_png: bool,

    /// Emit SVG drawings.
    #[arg(long)]
    to_svg: bool,

    /// Directory for output files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

impl Cmd {
    fn wants(&self) -> Exports {
        // With no explicit selection, write the grid and the smoothed
        // shapes; that is the output people come for.
        let any = self.write_pixels || self.write_grid || self.write_shapes || self.write_smooth;
        Exports {
            pixels: self.write_pixels,
            grid: self.write_grid || !any,
            shapes: self.write_shapes,
            smooth: self.write_smooth || !any,
        }
    }
}

#[derive(Clone, Copy)]
struct Exports {
    pixels: bool,
    grid: bool,
    shapes: bool,
    smooth: bool,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let to_png = cmd.to_png || !cmd.to_svg;
    std::fs::create_dir_all(&cmd.output_dir)
        .with_context(|| format!("creating {}", cmd.output_dir.display()))?;
    for input in &cmd.inputs {
        process_file(&cmd, input, to_png)
            .with_context(|| format!("processing {}", input.display()))?;
    }
    Ok(())
}

fn process_file(cmd: &Cmd, input: &Path, to_png: bool) -> Result<()> {
    tracing::info!(file = %input.display(), "processing");
    let raster = png_io::read_png(input)?;
    tracing::info!(
        width = raster.width(),
        height = raster.height(),
        "depixeling"
    );
    let data = vectorize(&raster, &DepixelCfg::default())?;
    tracing::info!(
        shapes = data.shapes.len(),
        paths = data.paths.len(),
        "writing drawings"
    );

    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("depixel");
    let exports = cmd.wants();
    if to_png {
        write_png_exports(&data, cmd, exports, name)?;
    }
    if cmd.to_svg {
        write_svg_exports(&data, cmd, exports, name)?;
    }
    Ok(())
}

fn write_png_exports(
    data: &Vectorized<Rgb>,
    cmd: &Cmd,
    exports: Exports,
    name: &str,
) -> Result<()> {
    let writer = PngWriter::new(data, !cmd.no_nodes);
    if exports.pixels {
        writer.export_pixels(&cmd.output_dir, name)?;
    }
    if exports.grid {
        writer.export_grid(&cmd.output_dir, name)?;
    }
    if exports.shapes {
        writer.export_shapes(&cmd.output_dir, name)?;
    }
    if exports.smooth {
        writer.export_smooth(&cmd.output_dir, name)?;
    }
    Ok(())
}

fn write_svg_exports(
    data: &Vectorized<Rgb>,
    cmd: &Cmd,
    exports: Exports,
    name: &str,
) -> Result<()> {
    let writer = SvgWriter::new(data);
    if exports.pixels {
        writer.export_pixels(&cmd.output_dir, name)?;
    }
    if exports.grid {
        writer.export_grid(&cmd.output_dir, name)?;
    }
    if exports.shapes {
        writer.export_shapes(&cmd.output_dir, name)?;
    }
    if exports.smooth {
        writer.export_smooth(&cmd.output_dir, name)?;
    }
    Ok(())
}
