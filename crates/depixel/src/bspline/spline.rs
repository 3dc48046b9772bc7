//! Open B-splines over 2-D control points.

use std::cell::OnceCell;

use crate::error::{Error, Result};

/// 2-D point / vector used throughout the spline code.
pub type Point2 = nalgebra::Vector2<f64>;

/// A B-spline with `n + 1` control points, `m + 1` knots, and degree `p`,
/// where `m = n + p + 1`.
#[derive(Clone, Debug)]
pub struct BSpline {
    knots: Vec<f64>,
    points: Vec<Point2>,
    degree: usize,
    deriv: OnceCell<Box<BSpline>>,
}

impl PartialEq for BSpline {
    fn eq(&self, other: &Self) -> bool {
        self.knots == other.knots && self.points == other.points && self.degree == other.degree
    }
}

impl BSpline {
    /// Build a spline, validating the count law `m = n + p + 1` and knot
    /// monotonicity.
    pub fn new(knots: Vec<f64>, points: Vec<Point2>, degree: usize) -> Result<Self> {
        if knots.len() < points.len() + 1 {
            return Err(Error::InvalidSpline(format!(
                "{} knots cannot carry {} control points",
                knots.len(),
                points.len()
            )));
        }
        let expected = knots.len() - points.len() - 1;
        if degree != expected {
            return Err(Error::InvalidSpline(format!(
                "Expected degree {expected}, got {degree}"
            )));
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::InvalidSpline("knots must be nondecreasing".into()));
        }
        Ok(Self {
            knots,
            points,
            degree,
            deriv: OnceCell::new(),
        })
    }

    /// Build a spline with the degree implied by the knot and point counts.
    pub fn with_inferred_degree(knots: Vec<f64>, points: Vec<Point2>) -> Result<Self> {
        if knots.len() < points.len() + 1 {
            return Err(Error::InvalidSpline(format!(
                "{} knots cannot carry {} control points",
                knots.len(),
                points.len()
            )));
        }
        let degree = knots.len() - points.len() - 1;
        Self::new(knots, points, degree)
    }

    #[inline]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Parameter range on which the spline is defined.
    pub fn domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.knots.len() - 1 - self.degree],
        )
    }

    pub(crate) fn set_point(&mut self, index: usize, to: Point2) {
        self.points[index] = to;
        self.deriv = OnceCell::new();
    }

    /// Evaluate at `u` with De Boor's algorithm.
    pub fn eval(&self, u: f64) -> Result<Point2> {
        let (lo, hi) = self.domain();
        if !(lo..=hi).contains(&u) {
            return Err(Error::OutOfBounds(format!(
                "parameter {u} outside spline domain [{lo}, {hi}]"
            )));
        }
        let p = self.degree;
        // Knot span k and multiplicity s of u.
        let s = self.knots.iter().filter(|&&knot| knot == u).count();
        let mut k = self
            .knots
            .iter()
            .position(|&knot| knot >= u)
            .unwrap_or(self.knots.len() - 1);
        if s == 0 {
            k -= 1;
        }
        if p < s {
            // Full-multiplicity knot: the curve passes through a control
            // point.
            let i = k.saturating_sub(s).min(self.points.len() - 1);
            return Ok(self.points[i]);
        }
        // Triangular blend over P_{k-p} .. P_{k-s}, refined in place from
        // the high index down so each step still reads the previous level.
        let base = k - p;
        let mut work: Vec<Point2> = self.points[base..=k - s].to_vec();
        for r in 1..=(p - s) {
            for i in ((base + r)..=(k - s)).rev() {
                let alpha =
                    (u - self.knots[i]) / (self.knots[i + p - r + 1] - self.knots[i]);
                work[i - base] = work[i - 1 - base] * (1.0 - alpha) + work[i - base] * alpha;
            }
        }
        Ok(work[k - s - base])
    }

    /// Derivative spline: degree `p - 1` over the interior knots. Memoized
    /// until a control point moves.
    pub fn derivative(&self) -> Result<&BSpline> {
        if self.degree == 0 {
            return Err(Error::InvalidSpline(
                "cannot differentiate a degree-0 spline".into(),
            ));
        }
        Ok(self.deriv.get_or_init(|| Box::new(self.derivative_uncached())))
    }

    fn derivative_uncached(&self) -> BSpline {
        let p = self.degree;
        let knots: Vec<f64> = self.knots[1..self.knots.len() - 1].to_vec();
        let points: Vec<Point2> = (0..self.points.len() - 1)
            .map(|i| {
                let span = self.knots[i + 1 + p] - self.knots[i + 1];
                if span == 0.0 {
                    Point2::zeros()
                } else {
                    (self.points[i + 1] - self.points[i]) * (p as f64 / span)
                }
            })
            .collect();
        BSpline {
            knots,
            points,
            degree: p - 1,
            deriv: OnceCell::new(),
        }
    }

    /// Unsigned curvature at `u`; 0 where the tangent vanishes or the
    /// degree admits none.
    pub fn curvature(&self, u: f64) -> Result<f64> {
        if self.degree < 2 {
            return Ok(0.0);
        }
        let d1 = self.derivative()?;
        let d2 = d1.derivative()?;
        let v = d1.eval(u)?;
        let a = d2.eval(u)?;
        let denom = (v.x * v.x + v.y * v.y).powf(1.5);
        if denom == 0.0 {
            return Ok(0.0);
        }
        Ok((v.x * a.y - v.y * a.x).abs() / denom)
    }

    /// Composite-trapezoid integral of curvature over `[a, b]`; 0 on a
    /// degenerate span.
    pub fn curvature_integral(&self, a: f64, b: f64, intervals: usize) -> Result<f64> {
        if b <= a || intervals == 0 {
            return Ok(0.0);
        }
        let h = (b - a) / intervals as f64;
        let mut total = (self.curvature(a)? + self.curvature(b)?) / 2.0;
        for i in 1..intervals {
            total += self.curvature(a + h * i as f64)?;
        }
        Ok(total * h)
    }

    /// Curvature integrated over the non-degenerate knot spans that control
    /// point `index` influences, clipped to the domain.
    pub fn curvature_energy(&self, index: usize, intervals: usize) -> Result<f64> {
        let m = self.knots.len() - 1;
        let p = self.degree;
        let mut energy = 0.0;
        for span in index..=index + p {
            if span < p || span + p >= m {
                continue;
            }
            energy += self.curvature_integral(self.knots[span], self.knots[span + 1], intervals)?;
        }
        Ok(energy)
    }

    /// The same curve traversed backwards: knots reflected about 1/2,
    /// control points reversed.
    pub fn reversed(&self) -> BSpline {
        BSpline {
            knots: self.knots.iter().rev().map(|k| 1.0 - k).collect(),
            points: self.points.iter().rev().copied().collect(),
            degree: self.degree,
            deriv: OnceCell::new(),
        }
    }

    /// Decompose a quadratic spline into its quadratic Bezier segments:
    /// segment `i` is `(S(k_{i+2}), P_{i+1}, S(k_{i+3}))`.
    pub fn quadratic_bezier_segments(&self) -> Result<Vec<[Point2; 3]>> {
        if self.degree != 2 {
            return Err(Error::InvalidSpline(format!(
                "Bezier decomposition requires degree 2, got {}",
                self.degree
            )));
        }
        let spans = self.knots.len() - 1 - 2 * self.degree;
        let mut segments = Vec::with_capacity(spans);
        for i in 0..spans {
            segments.push([
                self.eval(self.knots[i + 2])?,
                self.points[i + 1],
                self.eval(self.knots[i + 3])?,
            ]);
        }
        Ok(segments)
    }
}
