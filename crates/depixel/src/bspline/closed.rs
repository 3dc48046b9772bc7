//! Closed B-splines.
//!
//! Closure is represented by duplicating the first `p` control points at
//! the tail of a single array; updates go through `move_point` so both
//! copies stay in sync.

use crate::error::{Error, Result};

use super::spline::{BSpline, Point2};

/// A B-spline whose last `p` control points repeat its first `p`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedBSpline {
    spline: BSpline,
}

impl ClosedBSpline {
    pub fn new(knots: Vec<f64>, points: Vec<Point2>, degree: usize) -> Result<Self> {
        Self::from_spline(BSpline::new(knots, points, degree)?)
    }

    /// Wrap an open spline, validating the wrap-around.
    pub fn from_spline(spline: BSpline) -> Result<Self> {
        let p = spline.degree();
        let points = spline.points();
        if points.len() < 2 * p || points[..p] != points[points.len() - p..] {
            return Err(Error::InvalidSpline(format!(
                "closed spline must repeat its first {p} control points at the tail"
            )));
        }
        Ok(Self { spline })
    }

    /// Fit a closed spline through a cyclic polyline: control points
    /// `P ++ P[..p]`, uniform knots `i / m`.
    pub fn from_polyline(path: &[Point2], degree: usize) -> Result<Self> {
        if path.len() < degree.max(1) {
            return Err(Error::InvalidSpline(format!(
                "a closed degree-{degree} spline needs at least {} polyline nodes",
                degree.max(1)
            )));
        }
        let mut points = path.to_vec();
        points.extend_from_slice(&path[..degree]);
        let m = points.len() + degree;
        let knots: Vec<f64> = (0..=m).map(|i| i as f64 / m as f64).collect();
        Self::new(knots, points, degree)
    }

    /// Number of logically distinct control points.
    #[inline]
    pub fn useful_len(&self) -> usize {
        self.spline.points().len() - self.spline.degree()
    }

    /// Each logical control point exactly once.
    #[inline]
    pub fn useful_points(&self) -> &[Point2] {
        &self.spline.points()[..self.useful_len()]
    }

    /// Move logical control point `index`, updating the wrapped copy when
    /// `index < p`.
    pub fn move_point(&mut self, index: usize, to: Point2) -> Result<()> {
        let n = self.useful_len();
        if index >= n {
            return Err(Error::OutOfBounds(format!(
                "control point {index} out of {n}"
            )));
        }
        self.spline.set_point(index, to);
        if index < self.spline.degree() {
            self.spline.set_point(n + index, to);
        }
        Ok(())
    }

    /// Curvature energy of logical control point `index`, including the
    /// spans driven by its wrapped copy.
    pub fn curvature_energy(&self, index: usize, intervals: usize) -> Result<f64> {
        let mut energy = self.spline.curvature_energy(index, intervals)?;
        if index < self.spline.degree() {
            energy += self
                .spline
                .curvature_energy(self.useful_len() + index, intervals)?;
        }
        Ok(energy)
    }

    pub fn reversed(&self) -> ClosedBSpline {
        // Reversal maps the wrapped head/tail onto each other, so closure
        // is preserved.
        Self {
            spline: self.spline.reversed(),
        }
    }

    #[inline]
    pub fn as_spline(&self) -> &BSpline {
        &self.spline
    }

    #[inline]
    pub fn knots(&self) -> &[f64] {
        self.spline.knots()
    }

    #[inline]
    pub fn points(&self) -> &[Point2] {
        self.spline.points()
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.spline.degree()
    }

    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        self.spline.domain()
    }

    pub fn eval(&self, u: f64) -> Result<Point2> {
        self.spline.eval(u)
    }

    pub fn curvature(&self, u: f64) -> Result<f64> {
        self.spline.curvature(u)
    }

    pub fn quadratic_bezier_segments(&self) -> Result<Vec<[Point2; 3]>> {
        self.spline.quadratic_bezier_segments()
    }
}
