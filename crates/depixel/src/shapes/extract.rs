//! Shape grouping, outline isolation, and boundary walking.

use std::collections::{BTreeMap, BTreeSet};

use crate::bspline::{ClosedBSpline, Point2};
use crate::error::{Error, Result};
use crate::lattice::{LatticeGraph, LatticePoint};
use crate::similarity::{PixelGraph, PixelId};

use super::types::{OutlinePath, PathId, Shape};

/// Slope stand-in for vertical steps; larger than any real slope so
/// rightward steps win the first-step sort.
const VERTICAL_SLOPE: f64 = 99_999_999_999_999.0;

/// Copy the deformed lattice and delete every edge interior to a shape:
/// for each similarity edge, the two corner nodes its pixels share are
/// disconnected. Isolated nodes are dropped afterwards.
pub fn isolate_outlines<V>(pixels: &PixelGraph<V>, grid: &LatticeGraph) -> Result<LatticeGraph> {
    let mut outlines = grid.clone();
    for p in pixels.ids() {
        for &q in pixels.neighbors(p) {
            let shared: Vec<LatticePoint> = pixels
                .corners(p)
                .intersection(pixels.corners(q))
                .copied()
                .collect();
            if shared.len() != 2 {
                return Err(Error::GraphInvariant(format!(
                    "pixels {:?} and {:?} share {} corner nodes, expected 2",
                    pixels.coord(p),
                    pixels.coord(q),
                    shared.len()
                )));
            }
            if outlines.has_edge(shared[0], shared[1]) {
                outlines.remove_edge(shared[0], shared[1]);
            }
        }
    }
    outlines.remove_isolated();
    Ok(outlines)
}

/// Group pixels into shapes and walk each shape's boundary loops.
///
/// Shapes come out ordered by their smallest pixel; a loop shared between
/// two shapes is stored once and referenced from both.
pub fn extract_shapes<V: Clone>(
    pixels: &PixelGraph<V>,
    grid: &LatticeGraph,
) -> Result<(Vec<Shape<V>>, Vec<OutlinePath>)> {
    let outlines = isolate_outlines(pixels, grid)?;
    let mut paths: Vec<OutlinePath> = Vec::new();
    let mut path_ids: BTreeMap<Vec<LatticePoint>, PathId> = BTreeMap::new();
    let mut shapes: Vec<Shape<V>> = Vec::new();

    for component in pixel_components(pixels) {
        let mut corners: BTreeSet<LatticePoint> = BTreeSet::new();
        for &p in &component {
            corners.extend(pixels.corners(p).iter().copied());
        }
        // Corners may reference nodes another shape's loop absorbed; only
        // nodes still present in the outline graph bound this shape.
        let outline_nodes: BTreeSet<LatticePoint> = corners
            .iter()
            .copied()
            .filter(|&c| outlines.contains(c))
            .collect();
        let Some(&shape_min) = outline_nodes.iter().next() else {
            return Err(Error::GraphInvariant(format!(
                "shape at {:?} has no outline nodes",
                pixels.coord(component[0])
            )));
        };

        let mut outer: Option<PathId> = None;
        let mut holes: Vec<PathId> = Vec::new();
        for loop_nodes in corner_components(&outlines, &outline_nodes) {
            let is_outer = loop_nodes.contains(&shape_min);
            let walk = walk_loop(&outlines, &loop_nodes)?;
            let id = match path_ids.get(&walk) {
                Some(&id) => id,
                None => {
                    let id = PathId(paths.len());
                    let polyline: Vec<Point2> =
                        walk.iter().map(|n| n.to_point()).collect();
                    paths.push(OutlinePath {
                        spline: ClosedBSpline::from_polyline(&polyline, 2)?,
                        nodes: walk.clone(),
                        smooth: None,
                        shape_count: 0,
                    });
                    path_ids.insert(walk, id);
                    id
                }
            };
            paths[id.0].shape_count += 1;
            if is_outer {
                outer = Some(id);
            } else {
                holes.push(id);
            }
        }
        let Some(outer) = outer else {
            return Err(Error::GraphInvariant(format!(
                "shape at {:?} has no outer boundary",
                pixels.coord(component[0])
            )));
        };
        shapes.push(Shape {
            pixels: component.iter().map(|&p| pixels.coord(p)).collect(),
            value: pixels.value(component[0]).clone(),
            corners,
            outer,
            holes,
        });
    }
    Ok((shapes, paths))
}

/// Connected components of the similarity graph, each sorted, ordered by
/// smallest member.
fn pixel_components<V>(pixels: &PixelGraph<V>) -> Vec<Vec<PixelId>> {
    let mut visited = vec![false; pixels.len()];
    let mut components = Vec::new();
    for start in pixels.ids() {
        if visited[start.0] {
            continue;
        }
        visited[start.0] = true;
        let mut component = vec![start];
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for &next in pixels.neighbors(node) {
                if !visited[next.0] {
                    visited[next.0] = true;
                    component.push(next);
                    stack.push(next);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }
    components
}

/// Connected components of the outline graph restricted to `nodes`,
/// ordered by smallest member.
fn corner_components(
    outlines: &LatticeGraph,
    nodes: &BTreeSet<LatticePoint>,
) -> Vec<BTreeSet<LatticePoint>> {
    let mut visited: BTreeSet<LatticePoint> = BTreeSet::new();
    let mut components = Vec::new();
    for &start in nodes {
        if visited.contains(&start) {
            continue;
        }
        visited.insert(start);
        let mut component = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for next in outlines.neighbors(node) {
                if nodes.contains(&next) && visited.insert(next) {
                    component.insert(next);
                    stack.push(next);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Order one loop into a cyclic polyline: start at the smallest node, step
/// toward the smallest slope, then follow unvisited neighbors.
fn walk_loop(
    outlines: &LatticeGraph,
    nodes: &BTreeSet<LatticePoint>,
) -> Result<Vec<LatticePoint>> {
    let mut remaining = nodes.clone();
    let Some(&start) = nodes.iter().next() else {
        return Err(Error::GraphInvariant("empty outline loop".into()));
    };
    remaining.remove(&start);

    let mut first_steps: Vec<LatticePoint> = outlines
        .neighbors(start)
        .filter(|n| remaining.contains(n))
        .collect();
    first_steps.sort_by(|a, b| {
        slope(start, *a)
            .partial_cmp(&slope(start, *b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let Some(&second) = first_steps.first() else {
        return Err(Error::GraphInvariant(format!(
            "outline loop dead-ends at {start:?}"
        )));
    };
    remaining.remove(&second);

    let mut path = vec![start, second];
    let mut current = second;
    while !remaining.is_empty() {
        let Some(next) = outlines.neighbors(current).find(|n| remaining.contains(n)) else {
            return Err(Error::GraphInvariant(format!(
                "outline loop dead-ends at {current:?}"
            )));
        };
        remaining.remove(&next);
        path.push(next);
        current = next;
    }
    Ok(path)
}

fn slope(from: LatticePoint, to: LatticePoint) -> f64 {
    let dx = to.qx - from.qx;
    let dy = to.qy - from.qy;
    if dx == 0 {
        f64::from(dy) * VERTICAL_SLOPE
    } else {
        f64::from(dy) / f64::from(dx)
    }
}
