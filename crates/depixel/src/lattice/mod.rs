//! Pixel-corner lattice and its shape-respecting deformation.
//!
//! Purpose
//! - Hold the planar graph of pixel-cell corners with exact quarter-step
//!   coordinates, so node identity stays hash- and order-friendly.
//! - Bend cell edges around kept same-color diagonals, then collapse
//!   valence-<=2 nodes so every remaining node is a real polyline corner.
//!
//! Code cross-refs: `LatticePoint`, `LatticeGraph`, `deform_grid`.

mod deform;
mod types;

pub use deform::{build_lattice, deform_grid};
pub use types::{LatticeGraph, LatticePoint};
