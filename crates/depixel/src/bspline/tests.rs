use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::error::Error;

fn octagon_points(scale: f64) -> Vec<Point2> {
    [
        (2.0, 2.0),
        (4.0, 2.0),
        (5.0, 3.0),
        (5.0, 5.0),
        (4.0, 6.0),
        (2.0, 6.0),
        (1.0, 5.0),
        (1.0, 3.0),
    ]
    .iter()
    .map(|&(x, y)| Point2::new(x * scale, y * scale))
    .collect()
}

fn octagon_spline() -> ClosedBSpline {
    ClosedBSpline::from_polyline(&octagon_points(50.0), 2).unwrap()
}

#[test]
fn spline_degree_is_validated() {
    let knots = vec![0.0, 0.25, 0.5, 0.75, 1.0];
    let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
    assert_eq!(
        BSpline::with_inferred_degree(knots.clone(), points.clone())
            .unwrap()
            .degree(),
        2
    );
    assert_eq!(BSpline::new(knots.clone(), points.clone(), 2).unwrap().degree(), 2);
    let err = BSpline::new(knots, points, 3).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidSpline("Expected degree 2, got 3".into())
    );
}

#[test]
fn spline_domain() {
    let spline = octagon_spline();
    let (lo, hi) = spline.domain();
    assert!((lo - 0.5 / 3.0).abs() < 1e-12);
    assert!((hi - (1.0 - 0.5 / 3.0)).abs() < 1e-12);
    assert_eq!(spline.domain(), (spline.knots()[2], spline.knots()[10]));
}

#[test]
fn spline_point_at_knot() {
    let spline = octagon_spline();
    let p = spline.eval(0.5).unwrap();
    assert_eq!((p.x.round(), p.y.round()), (150.0, 300.0));
}

#[test]
fn eval_outside_domain_fails() {
    let spline = octagon_spline();
    assert!(matches!(spline.eval(0.0), Err(Error::OutOfBounds(_))));
    assert!(matches!(spline.eval(0.99), Err(Error::OutOfBounds(_))));
}

#[test]
fn spline_derivative_shape() {
    let spline = octagon_spline();
    let deriv = spline.as_spline().derivative().unwrap();
    assert_eq!(deriv.degree(), spline.degree() - 1);
    assert_eq!(deriv.knots(), &spline.knots()[1..spline.knots().len() - 1]);
    assert_eq!(deriv.points().len(), spline.points().len() - 1);
    // Chaining p derivatives reaches degree 0 and stops there.
    let second = deriv.derivative().unwrap();
    assert_eq!(second.degree(), 0);
    assert!(second.derivative().is_err());
}

#[test]
fn curvature_at_knot() {
    let spline = octagon_spline();
    let c = spline.curvature(0.5).unwrap();
    assert!(((c * 1e5).round() / 1e5 - 0.005).abs() < 1e-12);
}

#[test]
fn curvature_of_a_degenerate_spline_is_zero() {
    let points = vec![Point2::new(3.0, 4.0); 8];
    let spline = ClosedBSpline::from_polyline(&points[..6], 2).unwrap();
    let (lo, hi) = spline.domain();
    assert_eq!(spline.curvature((lo + hi) / 2.0).unwrap(), 0.0);
}

#[test]
fn polyline_round_trip() {
    let points = octagon_points(1.0);
    let spline = ClosedBSpline::from_polyline(&points, 2).unwrap();
    assert_eq!(spline.useful_points(), &points[..]);
    assert_eq!(spline.points().len(), points.len() + 2);
    assert_eq!(spline.knots().len(), spline.points().len() + 2 + 1);
}

#[test]
fn closed_spline_rejects_a_broken_wrap() {
    let mut points = octagon_points(1.0);
    let degree = 2;
    points.push(points[0]);
    points.push(Point2::new(42.0, 42.0));
    let m = points.len() + degree;
    let knots: Vec<f64> = (0..=m).map(|i| i as f64 / m as f64).collect();
    let err = ClosedBSpline::new(knots, points, degree).unwrap_err();
    assert!(matches!(err, Error::InvalidSpline(_)));
}

#[test]
fn move_point_keeps_the_wrap_in_sync() {
    let mut spline = octagon_spline();
    let n = spline.useful_len();
    let to = Point2::new(7.0, -3.0);
    spline.move_point(0, to).unwrap();
    assert_eq!(spline.points()[0], to);
    assert_eq!(spline.points()[n], to);
    // A non-wrapped index only moves once.
    let to2 = Point2::new(1.0, 2.0);
    spline.move_point(3, to2).unwrap();
    assert_eq!(spline.points()[3], to2);
    assert!(spline.move_point(n, to2).is_err());
}

#[test]
fn reversal_is_involutive() {
    let spline = octagon_spline();
    let back = spline.reversed().reversed();
    assert_eq!(back.points(), spline.points());
    assert_eq!(back.degree(), spline.degree());
    for (a, b) in back.knots().iter().zip(spline.knots()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn quadratic_bezier_segments_cover_the_domain() {
    let spline = octagon_spline();
    let segments = spline.quadratic_bezier_segments().unwrap();
    assert_eq!(segments.len(), 8);
    for (i, segment) in segments.iter().enumerate() {
        let start = spline.eval(spline.knots()[i + 2]).unwrap();
        let end = spline.eval(spline.knots()[i + 3]).unwrap();
        assert_eq!(segment[0], start);
        assert_eq!(segment[1], spline.points()[i + 1]);
        assert_eq!(segment[2], end);
    }
    // Consecutive segments join at their on-curve points.
    for pair in segments.windows(2) {
        assert_eq!(pair[0][2], pair[1][0]);
    }
}

#[test]
fn smoothing_with_zero_offset_is_the_identity() {
    let spline = octagon_spline();
    let cfg = SmoothCfg {
        offset: 0.0,
        iterations: 3,
        ..SmoothCfg::default()
    };
    let mut rng = StdRng::seed_from_u64(99);
    let smooth = smooth_spline(&spline, &cfg, &mut rng).unwrap();
    assert_eq!(smooth, spline);
}

#[test]
fn smoothing_is_reproducible_for_a_fixed_seed() {
    let spline = ClosedBSpline::from_polyline(&octagon_points(1.0), 2).unwrap();
    let cfg = SmoothCfg {
        iterations: 2,
        ..SmoothCfg::default()
    };
    let a = smooth_spline(&spline, &cfg, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = smooth_spline(&spline, &cfg, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
    // The input spline is left untouched.
    assert_eq!(spline.useful_points(), &octagon_points(1.0)[..]);
}

proptest! {
    #[test]
    fn closed_spline_laws(
        coords in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..16)
    ) {
        let points: Vec<Point2> = coords.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let spline = ClosedBSpline::from_polyline(&points, 2).unwrap();

        // Count law and wrap-around.
        prop_assert_eq!(
            spline.knots().len(),
            spline.points().len() + spline.degree() + 1
        );
        let p = spline.degree();
        let tail = spline.points().len() - p;
        prop_assert_eq!(&spline.points()[..p], &spline.points()[tail..]);
        prop_assert_eq!(spline.useful_points(), &points[..]);

        // Reversal is involutive up to the knot reflection.
        let back = spline.reversed().reversed();
        prop_assert_eq!(back.points(), spline.points());
        for (a, b) in back.knots().iter().zip(spline.knots()) {
            prop_assert!((a - b).abs() < 1e-12);
        }

        // Chaining p derivatives yields a degree-0 spline.
        let d1 = spline.as_spline().derivative().unwrap();
        let d2 = d1.derivative().unwrap();
        prop_assert_eq!(d2.degree(), 0);

        // Evaluation is defined across the whole domain.
        let (lo, hi) = spline.domain();
        for i in 0..=8 {
            let u = lo + (hi - lo) * f64::from(i) / 8.0;
            prop_assert!(spline.eval(u).is_ok());
        }
    }
}
