use super::*;
use crate::lattice::{build_lattice, deform_grid, LatticePoint};
use crate::raster::PixelGrid;
use crate::similarity::{build_pixel_graph, resolve_diagonals, HeuristicsPolicy, PixelGraph};
use crate::testutil::{mkpixels, CIRCLE, ISLAND};

fn lp(x: f64, y: f64) -> LatticePoint {
    LatticePoint::from_quarters((x * 4.0) as i32, (y * 4.0) as i32)
}

fn prepared(text: &str) -> (PixelGraph<u8>, crate::lattice::LatticeGraph) {
    let raster = mkpixels(text);
    let mut pixels = build_pixel_graph(&raster);
    resolve_diagonals(&mut pixels, HeuristicsPolicy::Greedy).unwrap();
    let mut grid = build_lattice(raster.width(), raster.height());
    deform_grid(&mut pixels, &mut grid);
    (pixels, grid)
}

#[test]
fn outlines_keep_no_interior_edges() {
    let (pixels, grid) = prepared(ISLAND);
    let outlines = isolate_outlines(&pixels, &grid).unwrap();
    // Edges interior to the background are gone, boundaries stay.
    assert!(!outlines.has_edge(lp(1.0, 0.0), lp(1.0, 1.0)));
    assert!(!outlines.has_edge(lp(3.0, 1.0), lp(3.0, 2.0)));
    assert!(outlines.has_edge(lp(0.0, 0.0), lp(1.0, 0.0)));
    assert!(outlines.has_edge(lp(1.25, 1.25), lp(1.75, 1.25)));
    // The bridge interior to the island region is gone too.
    assert!(!outlines.has_edge(lp(2.25, 1.75), lp(1.75, 2.25)));
}

#[test]
fn island_shapes_and_outlines() {
    let (pixels, grid) = prepared(ISLAND);
    let (shapes, paths) = extract_shapes(&pixels, &grid).unwrap();
    assert_eq!(shapes.len(), 2);

    let background = &shapes[0];
    assert_eq!(background.value, 0);
    assert_eq!(background.pixels.len(), 9);
    assert!(background.holes.is_empty());
    // The island reaches the image border, so the background outline is a
    // single loop mixing border segments with the island boundary.
    assert_eq!(paths[background.outer.0].nodes.len(), 18);

    let island = &shapes[1];
    assert_eq!(island.value, 1);
    assert_eq!(island.pixels, vec![(1, 1), (2, 2), (3, 2)]);
    assert!(island.holes.is_empty());
    assert_eq!(
        paths[island.outer.0].nodes,
        vec![
            lp(1.25, 1.25),
            lp(1.75, 1.25),
            lp(2.25, 1.75),
            lp(3.0, 2.0),
            lp(4.0, 2.0),
            lp(4.0, 3.0),
            lp(3.0, 3.0),
            lp(2.0, 3.0),
            lp(1.75, 2.25),
            lp(1.25, 1.75),
        ]
    );

    // Both loops touch the border, so each belongs to exactly one shape.
    for path in &paths {
        assert_eq!(path.shape_count, 1);
    }
}

#[test]
fn circle_ring_has_one_outer_boundary_and_one_hole() {
    let (pixels, grid) = prepared(CIRCLE);
    let (shapes, paths) = extract_shapes(&pixels, &grid).unwrap();
    assert_eq!(shapes.len(), 3);

    let ring = shapes
        .iter()
        .find(|s| s.value == 1)
        .expect("ring shape exists");
    assert_eq!(ring.pixels.len(), 8);
    assert_eq!(paths[ring.outer.0].nodes.len(), 16);
    assert_eq!(ring.holes.len(), 1);
    // Four corner cut points plus the four mid-side lattice nodes.
    assert_eq!(paths[ring.holes[0].0].nodes.len(), 8);

    // The exterior background holds the ring boundary as its hole; the
    // enclosed background's outer loop is the ring's hole. Both are shared
    // path instances, not copies.
    let outer_bg = &shapes[0];
    assert_eq!(outer_bg.value, 0);
    assert_eq!(outer_bg.holes, vec![ring.outer]);
    let inner_bg = shapes
        .iter()
        .find(|s| s.value == 0 && s.pixels.len() == 4)
        .expect("enclosed background exists");
    assert_eq!(inner_bg.outer, ring.holes[0]);
    assert!(inner_bg.holes.is_empty());

    for (id, path) in paths.iter().enumerate() {
        let expected = if id == outer_bg.outer.0 { 1 } else { 2 };
        assert_eq!(path.shape_count, expected);
    }
}

#[test]
fn single_pixel_image_is_one_square_shape() {
    let raster = PixelGrid::from_rows(vec![vec![9u8]]).unwrap();
    let mut pixels = build_pixel_graph(&raster);
    resolve_diagonals(&mut pixels, HeuristicsPolicy::Greedy).unwrap();
    let mut grid = build_lattice(1, 1);
    deform_grid(&mut pixels, &mut grid);
    let (shapes, paths) = extract_shapes(&pixels, &grid).unwrap();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].value, 9);
    assert!(shapes[0].holes.is_empty());
    assert_eq!(
        paths[shapes[0].outer.0].nodes,
        vec![lp(0.0, 0.0), lp(1.0, 0.0), lp(1.0, 1.0), lp(0.0, 1.0)]
    );
}

#[test]
fn alternating_strip_yields_unit_squares() {
    let raster = PixelGrid::from_rows(vec![vec![0u8, 1, 0, 1]]).unwrap();
    let mut pixels = build_pixel_graph(&raster);
    resolve_diagonals(&mut pixels, HeuristicsPolicy::Greedy).unwrap();
    let mut grid = build_lattice(4, 1);
    deform_grid(&mut pixels, &mut grid);
    let (shapes, paths) = extract_shapes(&pixels, &grid).unwrap();
    assert_eq!(shapes.len(), 4);
    for (i, shape) in shapes.iter().enumerate() {
        let x = i as f64;
        assert_eq!(shape.pixels, vec![(i as i32, 0)]);
        assert!(shape.holes.is_empty());
        assert_eq!(
            paths[shape.outer.0].nodes,
            vec![lp(x, 0.0), lp(x + 1.0, 0.0), lp(x + 1.0, 1.0), lp(x, 1.0)]
        );
    }
}
