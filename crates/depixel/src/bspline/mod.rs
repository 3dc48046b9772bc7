//! Quadratic B-splines: De Boor evaluation, differentiation, curvature,
//! closed variants, and stochastic smoothing.
//!
//! Purpose
//! - Fit each boundary polyline with a closed quadratic B-spline and
//!   smooth it by locally minimizing curvature plus positional drift.
//!
//! Code cross-refs: `BSpline`, `ClosedBSpline`, `smooth_spline`.

mod closed;
mod smooth;
mod spline;

pub use closed::ClosedBSpline;
pub use smooth::{smooth_spline, SmoothCfg};
pub use spline::{BSpline, Point2};

#[cfg(test)]
mod tests;
