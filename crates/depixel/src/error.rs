//! Error kinds reported by the vectorization core.
//!
//! I/O never happens inside the core; I/O failures belong to the callers
//! that read rasters and write drawings.

use thiserror::Error;

/// Everything the core can fail with.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Knot/point/degree counts violate `m = n + p + 1`, or a closed
    /// spline does not repeat its leading control points at the tail.
    #[error("{0}")]
    InvalidSpline(String),

    /// A 2x2 pixel block carries a diagonal layout that is neither fully
    /// connected, nor checkerboard, nor trivially diagonal-free. Usually a
    /// symptom of a non-symmetric match predicate.
    #[error("graph invariant violated: {0}")]
    GraphInvariant(String),

    /// The iterative heuristics finished a pass without resolving any of
    /// the remaining ambiguous diagonal pairs.
    #[error("no progress on {0} ambiguous diagonal pairs")]
    Unresolvable(usize),

    /// Spline parameter or pixel coordinate outside its valid range.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}

pub type Result<T> = std::result::Result<T, Error>;
