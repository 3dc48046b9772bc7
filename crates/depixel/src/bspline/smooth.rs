//! Randomized local smoothing of closed splines.
//!
//! Per control point, a small hill-climb: propose random offsets, keep the
//! one minimizing curvature energy plus a quartic drift penalty that
//! anchors the result to the fitted spline.

use rand::Rng;

use crate::error::Result;

use super::closed::ClosedBSpline;
use super::spline::Point2;

/// Smoothing parameters.
#[derive(Clone, Copy, Debug)]
pub struct SmoothCfg {
    /// Trapezoid subdivisions per knot span when integrating curvature.
    pub intervals: usize,
    /// Random candidate offsets per control-point visit.
    pub guesses: usize,
    /// Candidate offsets have length uniform in `[0, offset)`.
    pub offset: f64,
    /// Full passes over the control points.
    pub iterations: usize,
    /// Scale on the positional (anchoring) energy term.
    pub positional_multiplier: f64,
}

impl Default for SmoothCfg {
    fn default() -> Self {
        Self {
            intervals: 20,
            guesses: 20,
            offset: 0.05,
            iterations: 20,
            positional_multiplier: 1.0,
        }
    }
}

/// Smooth a copy of `spline`; the input stays intact.
///
/// Output is a pure function of the input, the configuration, and the RNG
/// stream, so a seeded `rng` makes the result reproducible.
pub fn smooth_spline<R: Rng>(
    spline: &ClosedBSpline,
    cfg: &SmoothCfg,
    rng: &mut R,
) -> Result<ClosedBSpline> {
    let mut smooth = spline.clone();
    for _ in 0..cfg.iterations {
        for index in 0..smooth.useful_len() {
            let start = smooth.useful_points()[index];
            let mut best = start;
            let mut best_energy = point_energy(&smooth, spline, index, cfg)?;
            for _ in 0..cfg.guesses {
                let radius = rng.gen::<f64>() * cfg.offset;
                let angle = rng.gen::<f64>() * std::f64::consts::TAU;
                let candidate = start + Point2::new(radius * angle.cos(), radius * angle.sin());
                smooth.move_point(index, candidate)?;
                let energy = point_energy(&smooth, spline, index, cfg)?;
                if energy < best_energy {
                    best_energy = energy;
                    best = candidate;
                }
            }
            smooth.move_point(index, best)?;
        }
    }
    Ok(smooth)
}

fn point_energy(
    current: &ClosedBSpline,
    original: &ClosedBSpline,
    index: usize,
    cfg: &SmoothCfg,
) -> Result<f64> {
    let drift = (current.useful_points()[index] - original.useful_points()[index]).norm();
    let positional = cfg.positional_multiplier * drift.powi(4);
    Ok(positional + current.curvature_energy(index, cfg.intervals)?)
}
