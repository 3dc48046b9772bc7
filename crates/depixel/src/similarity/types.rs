//! Data types for the pixel similarity graph.
//!
//! One struct-of-arrays graph instead of a generic attributed one: `values`
//! and `corners` are per-node columns, adjacency lists stay sorted, and the
//! `diagonal` flag of an edge is derived from its endpoint coordinates.

use std::collections::BTreeSet;

use crate::lattice::LatticePoint;
use crate::raster::PixelGrid;

/// Identifier of a pixel node (row-major index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelId(pub usize);

/// Undirected similarity graph over the pixels of one raster.
#[derive(Clone, Debug)]
pub struct PixelGraph<V> {
    width: usize,
    height: usize,
    values: Vec<V>,
    corners: Vec<BTreeSet<LatticePoint>>,
    adj: Vec<Vec<PixelId>>,
}

impl<V: Clone> PixelGraph<V> {
    /// Edge-free graph mirroring `grid`, with each pixel owning its four
    /// integer cell corners.
    pub(crate) fn from_grid(grid: &PixelGrid<V>) -> Self {
        let (width, height) = grid.size();
        let mut values = Vec::with_capacity(width * height);
        let mut corners = Vec::with_capacity(width * height);
        for (x, y) in grid.coords() {
            values.push(grid.at(x, y).clone());
            let (x, y) = (x as i32, y as i32);
            corners.push(BTreeSet::from([
                LatticePoint::new(x, y),
                LatticePoint::new(x + 1, y),
                LatticePoint::new(x, y + 1),
                LatticePoint::new(x + 1, y + 1),
            ]));
        }
        Self {
            width,
            height,
            values,
            corners,
            adj: vec![Vec::new(); width * height],
        }
    }
}

impl<V> PixelGraph<V> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn id(&self, x: usize, y: usize) -> PixelId {
        debug_assert!(x < self.width && y < self.height);
        PixelId(y * self.width + x)
    }

    /// Coordinates of a node, signed for neighbor arithmetic.
    #[inline]
    pub fn coord(&self, id: PixelId) -> (i32, i32) {
        ((id.0 % self.width) as i32, (id.0 / self.width) as i32)
    }

    #[inline]
    pub fn value(&self, id: PixelId) -> &V {
        &self.values[id.0]
    }

    #[inline]
    pub fn corners(&self, id: PixelId) -> &BTreeSet<LatticePoint> {
        &self.corners[id.0]
    }

    #[inline]
    pub(crate) fn corners_mut(&mut self, id: PixelId) -> &mut BTreeSet<LatticePoint> {
        &mut self.corners[id.0]
    }

    /// All node ids in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = PixelId> {
        (0..self.values.len()).map(PixelId)
    }

    /// Neighbors of `id` in ascending id order.
    #[inline]
    pub fn neighbors(&self, id: PixelId) -> &[PixelId] {
        &self.adj[id.0]
    }

    #[inline]
    pub fn degree(&self, id: PixelId) -> usize {
        self.adj[id.0].len()
    }

    pub fn has_edge(&self, a: PixelId, b: PixelId) -> bool {
        self.adj[a.0].binary_search(&b).is_ok()
    }

    /// Insert an undirected edge. Idempotent.
    pub(crate) fn add_edge(&mut self, a: PixelId, b: PixelId) {
        if let Err(pos) = self.adj[a.0].binary_search(&b) {
            self.adj[a.0].insert(pos, b);
        }
        if let Err(pos) = self.adj[b.0].binary_search(&a) {
            self.adj[b.0].insert(pos, a);
        }
    }

    pub(crate) fn remove_edge(&mut self, a: PixelId, b: PixelId) {
        if let Ok(pos) = self.adj[a.0].binary_search(&b) {
            self.adj[a.0].remove(pos);
        }
        if let Ok(pos) = self.adj[b.0].binary_search(&a) {
            self.adj[b.0].remove(pos);
        }
    }

    /// An edge is diagonal iff both coordinates differ.
    pub fn is_diagonal(&self, a: PixelId, b: PixelId) -> bool {
        let (ax, ay) = self.coord(a);
        let (bx, by) = self.coord(b);
        ax != bx && ay != by
    }

    /// Canonical `(min, max)` edge list as coordinate pairs with their
    /// diagonal flag, in ascending coordinate order.
    pub fn coord_edges(&self) -> Vec<((i32, i32), (i32, i32), bool)> {
        let mut edges = Vec::new();
        for a in self.ids() {
            for &b in self.neighbors(a) {
                let (ca, cb) = (self.coord(a), self.coord(b));
                if ca < cb {
                    edges.push((ca, cb, self.is_diagonal(a, b)));
                }
            }
        }
        edges.sort_unstable();
        edges
    }
}
