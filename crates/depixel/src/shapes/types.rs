//! Shape and outline data types.

use std::collections::BTreeSet;

use crate::bspline::ClosedBSpline;
use crate::lattice::LatticePoint;

/// Identifier of a canonical outline path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathId(pub usize);

/// One closed boundary loop.
///
/// Two shapes separated by the same loop (outside of one, inside of the
/// other) share a single `OutlinePath`; `shape_count` records how many
/// shapes reference it. A count of one marks the image border.
#[derive(Clone, Debug)]
pub struct OutlinePath {
    /// Ordered cyclic lattice polyline.
    pub nodes: Vec<LatticePoint>,
    /// Closed quadratic fit through `nodes`.
    pub spline: ClosedBSpline,
    /// Smoothed counterpart, filled in by the pipeline.
    pub smooth: Option<ClosedBSpline>,
    pub shape_count: usize,
}

/// A maximal connected group of similar pixels.
#[derive(Clone, Debug)]
pub struct Shape<V> {
    /// Member pixel coordinates in row-major order.
    pub pixels: Vec<(i32, i32)>,
    /// The common pixel value.
    pub value: V,
    /// Lattice nodes bounding the shape's cells.
    pub corners: BTreeSet<LatticePoint>,
    /// The exterior boundary loop. Reverse it on use so its orientation
    /// opposes the holes.
    pub outer: PathId,
    /// Interior hole loops.
    pub holes: Vec<PathId>,
}
