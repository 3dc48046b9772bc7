//! Lattice construction, deformation around kept diagonals, and collapse.

use crate::similarity::{PixelGraph, PixelId};

use super::types::{LatticeGraph, LatticePoint};

/// Integer corner lattice of a `width` x `height` raster with 4-neighbor
/// edges.
pub fn build_lattice(width: usize, height: usize) -> LatticeGraph {
    let mut grid = LatticeGraph::default();
    for y in 0..=height as i32 {
        for x in 0..=width as i32 {
            let node = LatticePoint::new(x, y);
            grid.add_node(node);
            if x > 0 {
                grid.add_edge(LatticePoint::new(x - 1, y), node);
            }
            if y > 0 {
                grid.add_edge(LatticePoint::new(x, y - 1), node);
            }
        }
    }
    grid
}

/// Bend cell edges around every kept similar diagonal, collapse valence-<=2
/// nodes, and prune each pixel's corner set to surviving nodes.
///
/// Every diagonal is visited from both endpoints; the two visits handle the
/// two cell edges meeting at the shared corner, and the mid-point existence
/// check makes the net lattice independent of visit order.
pub fn deform_grid<V>(pixels: &mut PixelGraph<V>, grid: &mut LatticeGraph) {
    for p in pixels.ids() {
        deform_pixel(pixels, grid, p);
    }
    collapse(grid, pixels.width(), pixels.height());
    for p in pixels.ids() {
        let keep: Vec<LatticePoint> = pixels
            .corners(p)
            .iter()
            .copied()
            .filter(|c| grid.contains(*c))
            .collect();
        let corners = pixels.corners_mut(p);
        corners.clear();
        corners.extend(keep);
    }
}

fn deform_pixel<V>(pixels: &mut PixelGraph<V>, grid: &mut LatticeGraph, p: PixelId) {
    let (x, y) = pixels.coord(p);
    let neighbors: Vec<PixelId> = pixels.neighbors(p).to_vec();
    for q in neighbors {
        let (nx, ny) = pixels.coord(q);
        if nx == x || ny == y {
            continue;
        }
        let (dx, dy) = (nx - x, ny - y);
        let (px, py) = (x.max(nx), y.max(ny));
        let shared = LatticePoint::new(px, py);

        // Horizontal off-diagonal neighbor: cut the vertical cell edge.
        let r = pixels.id(nx as usize, y as usize);
        if !pixels.has_edge(p, r) {
            let pn = LatticePoint::new(px, py - dy);
            let mpn = LatticePoint::from_quarters(4 * px, 4 * py - 2 * dy);
            let npn = LatticePoint::from_quarters(4 * px + dx, 4 * py - dy);
            pixels.corners_mut(r).remove(&shared);
            pixels.corners_mut(r).insert(npn);
            pixels.corners_mut(p).insert(npn);
            bend_cell_edge(grid, shared, pn, mpn, npn);
        }

        // Vertical off-diagonal neighbor: same construction, axes swapped.
        let s = pixels.id(x as usize, ny as usize);
        if !pixels.has_edge(p, s) {
            let pn = LatticePoint::new(px - dx, py);
            let mpn = LatticePoint::from_quarters(4 * px - 2 * dx, 4 * py);
            let npn = LatticePoint::from_quarters(4 * px - dx, 4 * py + dy);
            pixels.corners_mut(s).remove(&shared);
            pixels.corners_mut(s).insert(npn);
            pixels.corners_mut(p).insert(npn);
            bend_cell_edge(grid, shared, pn, mpn, npn);
        }
    }
}

/// Re-route the cell edge `pn`--`shared` through `mpn` and the inward cut
/// point `npn`. A pre-existing `mpn` means the other end of this cell edge
/// was already bent; only the half toward `shared` moves then.
fn bend_cell_edge(
    grid: &mut LatticeGraph,
    shared: LatticePoint,
    pn: LatticePoint,
    mpn: LatticePoint,
    npn: LatticePoint,
) {
    if grid.contains(mpn) {
        grid.remove_edge(mpn, shared);
    } else {
        grid.remove_edge(pn, shared);
        grid.add_edge(pn, mpn);
    }
    grid.add_edge(mpn, npn);
    grid.add_edge(npn, shared);
}

/// Remove every non-image-corner node of live degree <= 2, bridging the
/// neighbors of exactly-degree-2 nodes. Removals are deferred to the end of
/// the sweep so bridges chain the way live-neighbor reads imply.
fn collapse(grid: &mut LatticeGraph, width: usize, height: usize) {
    let (w, h) = (width as i32, height as i32);
    let image_corners = [
        LatticePoint::new(0, 0),
        LatticePoint::new(w, 0),
        LatticePoint::new(0, h),
        LatticePoint::new(w, h),
    ];
    let nodes: Vec<LatticePoint> = grid.nodes().collect();
    let mut removals = Vec::new();
    for node in nodes {
        if image_corners.contains(&node) {
            continue;
        }
        let neighbors: Vec<LatticePoint> = grid.neighbors(node).collect();
        if neighbors.len() == 2 {
            grid.add_edge(neighbors[0], neighbors[1]);
        }
        if neighbors.len() <= 2 {
            removals.push(node);
        }
    }
    for node in removals {
        grid.remove_node(node);
    }
}
