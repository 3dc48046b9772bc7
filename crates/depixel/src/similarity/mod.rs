//! Similarity graph over pixels and diagonal disambiguation.
//!
//! Purpose
//! - Connect 8-neighbor pixels whose values match under the caller's
//!   predicate, then resolve the crossing diagonals inside 2x2 blocks with
//!   the curve/sparsity/island heuristics.
//!
//! Code cross-refs: `PixelGraph`, `build_pixel_graph`, `resolve_diagonals`.

mod build;
mod heuristics;
mod iterative;
mod types;

pub use build::{build_pixel_graph, build_pixel_graph_with};
pub use heuristics::{resolve_diagonals, HeuristicsPolicy};
pub use types::{PixelGraph, PixelId};
