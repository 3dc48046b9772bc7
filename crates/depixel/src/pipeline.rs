//! End-to-end driver: raster in, shapes and smoothed splines out.
//!
//! Data flows strictly forward through the stages; every structure is
//! final once the next stage starts reading it.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bspline::{smooth_spline, SmoothCfg};
use crate::error::{Error, Result};
use crate::lattice::{build_lattice, deform_grid, LatticeGraph, LatticePoint};
use crate::raster::PixelGrid;
use crate::shapes::{extract_shapes, OutlinePath, Shape};
use crate::similarity::{
    build_pixel_graph_with, resolve_diagonals, HeuristicsPolicy, PixelGraph,
};

/// Pipeline configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepixelCfg {
    pub policy: HeuristicsPolicy,
    pub smoothing: SmoothCfg,
    /// Base seed for the per-path smoothing RNG schedule.
    pub seed: u64,
}

/// Everything the pipeline produces, in a stable order: shapes sorted by
/// their smallest pixel, paths in first-encounter order.
#[derive(Clone, Debug)]
pub struct Vectorized<V> {
    pub pixels: PixelGraph<V>,
    pub grid: LatticeGraph,
    pub shapes: Vec<Shape<V>>,
    pub paths: Vec<OutlinePath>,
}

impl<V> Vectorized<V> {
    /// Walk one pixel's corner cycle along the deformed grid.
    pub fn cell_polygon(&self, x: usize, y: usize) -> Result<Vec<LatticePoint>> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return Err(Error::OutOfBounds(format!(
                "pixel ({x}, {y}) outside a {}x{} grid",
                self.pixels.width(),
                self.pixels.height()
            )));
        }
        let id = self.pixels.id(x, y);
        let mut remaining = self.pixels.corners(id).clone();
        let Some(&start) = remaining.iter().next() else {
            return Err(Error::GraphInvariant(format!(
                "pixel ({x}, {y}) has no corners"
            )));
        };
        remaining.remove(&start);
        let mut polygon = vec![start];
        let mut current = start;
        while !remaining.is_empty() {
            let Some(next) = self
                .grid
                .neighbors(current)
                .find(|n| remaining.contains(n))
            else {
                return Err(Error::GraphInvariant(format!(
                    "corner cycle of pixel ({x}, {y}) dead-ends at {current:?}"
                )));
            };
            remaining.remove(&next);
            polygon.push(next);
            current = next;
        }
        Ok(polygon)
    }
}

/// Run the whole pipeline with value-equality matching.
pub fn vectorize<V: Clone + PartialEq>(
    raster: &PixelGrid<V>,
    cfg: &DepixelCfg,
) -> Result<Vectorized<V>> {
    vectorize_with(raster, |a, b| a == b, cfg)
}

/// Run the whole pipeline with a caller-supplied match predicate.
pub fn vectorize_with<V, F>(
    raster: &PixelGrid<V>,
    matches: F,
    cfg: &DepixelCfg,
) -> Result<Vectorized<V>>
where
    V: Clone,
    F: Fn(&V, &V) -> bool,
{
    let mut pixels = build_pixel_graph_with(raster, matches);
    resolve_diagonals(&mut pixels, cfg.policy)?;
    let mut grid = build_lattice(raster.width(), raster.height());
    deform_grid(&mut pixels, &mut grid);
    let (shapes, mut paths) = extract_shapes(&pixels, &grid)?;
    smooth_paths(&mut paths, &cfg.smoothing, cfg.seed)?;
    Ok(Vectorized {
        pixels,
        grid,
        shapes,
        paths,
    })
}

/// Smooth every shared path; a path referenced by a single shape is the
/// image border and keeps its fitted spline.
fn smooth_paths(paths: &mut [OutlinePath], cfg: &SmoothCfg, seed: u64) -> Result<()> {
    for (index, path) in paths.iter_mut().enumerate() {
        if path.shape_count == 1 {
            path.smooth = Some(path.spline.clone());
            continue;
        }
        let mut rng = path_rng(seed, index as u64);
        path.smooth = Some(smooth_spline(&path.spline, cfg, &mut rng)?);
    }
    Ok(())
}

/// Per-path RNG from `(seed, index)`, SplitMix64-style mixing. Keeping the
/// schedule indexed lets a parallel smoother reproduce sequential output.
fn path_rng(seed: u64, index: u64) -> StdRng {
    fn mix(mut x: u64) -> u64 {
        x ^= x >> 30;
        x = x.wrapping_mul(0xbf58476d1ce4e5b9);
        x ^= x >> 27;
        x = x.wrapping_mul(0x94d049bb133111eb);
        x ^ (x >> 31)
    }
    StdRng::seed_from_u64(mix(seed ^ mix(index.wrapping_add(0x9e3779b97f4a7c15))))
}

#[cfg(test)]
mod tests;
