//! Connected shapes and their boundary outlines.
//!
//! Purpose
//! - Group similar pixels into shapes, strip shape-internal lattice edges,
//!   and walk each remaining loop into an ordered cyclic polyline tagged as
//!   an outer boundary or a hole.
//!
//! Code cross-refs: `Shape`, `OutlinePath`, `extract_shapes`.

mod extract;
mod types;

pub use extract::{extract_shapes, isolate_outlines};
pub use types::{OutlinePath, PathId, Shape};

#[cfg(test)]
mod tests;
