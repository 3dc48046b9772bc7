use super::*;
use crate::testutil::{mkpixels, CIRCLE, INVADER, ISLAND};

fn vectorize_text(text: &str, cfg: &DepixelCfg) -> Vectorized<u8> {
    vectorize(&mkpixels(text), cfg).unwrap()
}

#[test]
fn island_end_to_end() {
    let data = vectorize_text(ISLAND, &DepixelCfg::default());
    assert_eq!(data.shapes.len(), 2);
    assert_eq!(data.paths.len(), 2);
    // Both loops touch the image border, so neither is smoothed; the
    // smoothed copy is the fitted spline itself.
    for path in &data.paths {
        assert_eq!(path.shape_count, 1);
        assert_eq!(path.smooth.as_ref().unwrap(), &path.spline);
    }
}

#[test]
fn island_cell_polygon_walks_the_deformed_cell() {
    let data = vectorize_text(ISLAND, &DepixelCfg::default());
    let polygon = data.cell_polygon(1, 1).unwrap();
    let coords: Vec<(f64, f64)> = polygon.iter().map(|p| (p.x(), p.y())).collect();
    assert_eq!(
        coords,
        vec![
            (1.25, 1.25),
            (1.25, 1.75),
            (1.75, 2.25),
            (2.25, 1.75),
            (1.75, 1.25),
        ]
    );
    assert!(data.cell_polygon(4, 0).is_err());
}

#[test]
fn circle_smooths_only_shared_paths() {
    let data = vectorize_text(CIRCLE, &DepixelCfg::default());
    assert_eq!(data.shapes.len(), 3);
    assert_eq!(data.paths.len(), 3);
    let border = &data.paths[data.shapes[0].outer.0];
    assert_eq!(border.shape_count, 1);
    assert_eq!(border.smooth.as_ref().unwrap(), &border.spline);
    for path in data.paths.iter().filter(|p| p.shape_count == 2) {
        let smooth = path.smooth.as_ref().unwrap();
        // Fitted control points sit on lattice nodes; the smoothed copy
        // drifts off them but stays anchored nearby.
        assert_eq!(smooth.useful_len(), path.spline.useful_len());
        for (a, b) in smooth
            .useful_points()
            .iter()
            .zip(path.spline.useful_points())
        {
            assert!((a - b).norm() < 1.0);
        }
    }
}

#[test]
fn vectorize_is_deterministic() {
    let cfg = DepixelCfg {
        smoothing: crate::bspline::SmoothCfg {
            iterations: 3,
            ..Default::default()
        },
        seed: 11,
        ..Default::default()
    };
    let a = vectorize_text(INVADER, &cfg);
    let b = vectorize_text(INVADER, &cfg);
    assert_eq!(a.shapes.len(), b.shapes.len());
    assert_eq!(a.paths.len(), b.paths.len());
    for (pa, pb) in a.paths.iter().zip(&b.paths) {
        assert_eq!(pa.nodes, pb.nodes);
        assert_eq!(pa.smooth, pb.smooth);
    }
}

#[test]
fn iterative_policy_runs_the_full_pipeline() {
    let cfg = DepixelCfg {
        policy: HeuristicsPolicy::Iterative {
            greedy_fallback: true,
        },
        ..DepixelCfg::default()
    };
    let data = vectorize_text(ISLAND, &cfg);
    assert_eq!(data.shapes.len(), 2);
}

#[test]
fn custom_match_predicate_drives_similarity() {
    // Values 0 and 2 are declared similar, so the raster reads as flat.
    let raster = crate::raster::PixelGrid::from_rows(vec![vec![0u8, 2], vec![2, 0]]).unwrap();
    let data = vectorize_with(&raster, |a, b| a.abs_diff(*b) <= 2, &DepixelCfg::default())
        .unwrap();
    assert_eq!(data.shapes.len(), 1);
    assert_eq!(data.shapes[0].pixels.len(), 4);
}
