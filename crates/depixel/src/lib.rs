//! Depixelizing pixel art: small rasters to smooth vector outlines.
//!
//! The pipeline reconstructs a similarity graph over pixels, resolves
//! crossing diagonals with shape-aware heuristics, deforms the pixel-corner
//! lattice around the kept diagonals, walks each color region's boundary
//! loops, and fits and smooths closed quadratic B-splines to them.
//!
//! Stages live in their own modules, leaves first; `pipeline` wires them
//! together.

pub mod bspline;
pub mod error;
pub mod lattice;
pub mod pipeline;
pub mod raster;
pub mod shapes;
pub mod similarity;

#[cfg(test)]
pub(crate) mod testutil;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bspline::{smooth_spline, BSpline, ClosedBSpline, Point2, SmoothCfg};
    pub use crate::error::{Error, Result};
    pub use crate::lattice::{LatticeGraph, LatticePoint};
    pub use crate::pipeline::{vectorize, vectorize_with, DepixelCfg, Vectorized};
    pub use crate::raster::PixelGrid;
    pub use crate::shapes::{OutlinePath, PathId, Shape};
    pub use crate::similarity::{
        build_pixel_graph, build_pixel_graph_with, resolve_diagonals, HeuristicsPolicy,
        PixelGraph, PixelId,
    };
}
