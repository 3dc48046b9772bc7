//! Similarity graph construction.

use crate::raster::PixelGrid;

use super::types::{PixelGraph, PixelId};

/// Candidate neighbor offsets per pixel: right, down, up-right, down-right.
/// Visiting every pixel once covers all eight directions without duplicate
/// edges.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, -1), (1, 1)];

/// Build the similarity graph with plain value equality.
pub fn build_pixel_graph<V: Clone + PartialEq>(grid: &PixelGrid<V>) -> PixelGraph<V> {
    build_pixel_graph_with(grid, |a, b| a == b)
}

/// Build the similarity graph with a caller-supplied match predicate.
///
/// The predicate must be reflexive, symmetric, and total. It is not assumed
/// to be transitive: two pixels both matching a third may still differ.
pub fn build_pixel_graph_with<V, F>(grid: &PixelGrid<V>, matches: F) -> PixelGraph<V>
where
    V: Clone,
    F: Fn(&V, &V) -> bool,
{
    let mut graph = PixelGraph::from_grid(grid);
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    for (x, y) in grid.coords() {
        let (x, y) = (x as i32, y as i32);
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || nx >= width || ny < 0 || ny >= height {
                continue;
            }
            if matches(
                grid.at(x as usize, y as usize),
                grid.at(nx as usize, ny as usize),
            ) {
                let a = PixelId((y * width + x) as usize);
                let b = PixelId((ny * width + nx) as usize);
                graph.add_edge(a, b);
            }
        }
    }
    graph
}
