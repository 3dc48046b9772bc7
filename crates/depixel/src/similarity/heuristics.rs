//! 2x2 block scan and greedy diagonal resolution.
//!
//! Crossing diagonals only occur in fully-connected blocks (drop both) and
//! checkerboard blocks (score both, drop the loser). Anything else means
//! the match predicate misbehaved.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

use super::iterative::apply_iterative;
use super::types::{PixelGraph, PixelId};

/// Canonical undirected edge.
pub(super) type Edge = (PixelId, PixelId);

/// Side length of the window used by the sparsity weight.
pub(super) const SPARSE_WINDOW: i32 = 8;

/// Score bonus for a diagonal that keeps an otherwise isolated pixel
/// attached.
pub(super) const ISLAND_WEIGHT: i64 = 5;

/// How ambiguous diagonal pairs are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicsPolicy {
    /// Score each diagonal once against the current graph and drop every
    /// diagonal attaining its pair minimum (a tie drops both).
    Greedy,
    /// Score diagonals as `(min, max)` intervals over the possible final
    /// shapes and repeat passes until every pair resolves. A stalled pass
    /// either falls back to the greedy scores or fails `Unresolvable`.
    Iterative { greedy_fallback: bool },
}

impl Default for HeuristicsPolicy {
    fn default() -> Self {
        HeuristicsPolicy::Greedy
    }
}

#[inline]
pub(super) fn canonical(a: PixelId, b: PixelId) -> Edge {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Walk every 2x2 block, drop both diagonals of fully-connected blocks,
/// and resolve checkerboard blocks with the selected policy.
pub fn resolve_diagonals<V>(graph: &mut PixelGraph<V>, policy: HeuristicsPolicy) -> Result<()> {
    let mut ambiguous_pairs: Vec<[Edge; 2]> = Vec::new();

    for y in 0..graph.height().saturating_sub(1) {
        for x in 0..graph.width().saturating_sub(1) {
            let a = graph.id(x, y);
            let b = graph.id(x + 1, y);
            let c = graph.id(x, y + 1);
            let d = graph.id(x + 1, y + 1);
            let diagonals = [canonical(a, d), canonical(b, c)];
            let diagonal_count = diagonals
                .iter()
                .filter(|&&(p, q)| graph.has_edge(p, q))
                .count();
            if diagonal_count < 2 {
                continue;
            }
            let orthogonal_count = [(a, b), (c, d), (a, c), (b, d)]
                .iter()
                .filter(|&&(p, q)| graph.has_edge(p, q))
                .count();
            match orthogonal_count {
                // Fully connected: the diagonals carry no information.
                4 => {
                    for (p, q) in diagonals {
                        graph.remove_edge(p, q);
                    }
                }
                // Checkerboard: defer to the heuristics.
                0 => ambiguous_pairs.push(diagonals),
                n => {
                    return Err(Error::GraphInvariant(format!(
                        "2x2 block at ({x}, {y}) has two crossing diagonals \
                         next to {n} orthogonal similarity edges"
                    )))
                }
            }
        }
    }

    match policy {
        HeuristicsPolicy::Greedy => {
            apply_greedy(graph, &ambiguous_pairs);
            Ok(())
        }
        HeuristicsPolicy::Iterative { greedy_fallback } => {
            apply_iterative(graph, ambiguous_pairs, greedy_fallback)
        }
    }
}

/// Score all pairs against the unresolved graph, then drop losers.
///
/// Weighting before any removal matters: dropping a diagonal changes the
/// degrees seen by later curve and sparsity walks.
pub(super) fn apply_greedy<V>(graph: &mut PixelGraph<V>, pairs: &[[Edge; 2]]) {
    let weights: Vec<[i64; 2]> = pairs
        .iter()
        .map(|pair| [edge_weight(graph, pair[0]), edge_weight(graph, pair[1])])
        .collect();
    for (pair, weight) in pairs.iter().zip(&weights) {
        let min = weight[0].min(weight[1]);
        for k in 0..2 {
            if weight[k] == min {
                graph.remove_edge(pair[k].0, pair[k].1);
            }
        }
    }
}

pub(super) fn edge_weight<V>(graph: &PixelGraph<V>, edge: Edge) -> i64 {
    weight_curve(graph, edge) + weight_sparse(graph, edge) + weight_island(graph, edge)
}

/// Length of the valence-2 chain through `edge`.
///
/// Edges on long single-pixel-wide features are more likely to be
/// important.
pub(super) fn weight_curve<V>(graph: &PixelGraph<V>, edge: Edge) -> i64 {
    let mut seen: BTreeSet<Edge> = BTreeSet::from([edge]);
    let mut stack = vec![edge.0, edge.1];
    while let Some(node) = stack.pop() {
        if graph.degree(node) != 2 {
            // Not part of a curve.
            continue;
        }
        for &next in graph.neighbors(node) {
            if seen.insert(canonical(node, next)) {
                stack.push(next);
            }
        }
    }
    seen.len() as i64
}

/// Negated population of the component around `edge` inside an 8x8 window.
///
/// Sparse features read as foreground, so the sparser diagonal wins.
pub(super) fn weight_sparse<V>(graph: &PixelGraph<V>, edge: Edge) -> i64 {
    let (window_min, window_max) = sparse_window(graph, edge);
    let mut seen: BTreeSet<PixelId> = BTreeSet::from([edge.0, edge.1]);
    let mut stack = vec![edge.0, edge.1];
    while let Some(node) = stack.pop() {
        for &next in graph.neighbors(node) {
            if seen.contains(&next) {
                continue;
            }
            if in_window(graph.coord(next), window_min, window_max) {
                seen.insert(next);
                stack.push(next);
            }
        }
    }
    -(seen.len() as i64)
}

/// +5 when either endpoint would otherwise be an isolated pixel.
pub(super) fn weight_island<V>(graph: &PixelGraph<V>, edge: Edge) -> i64 {
    if graph.degree(edge.0) == 1 || graph.degree(edge.1) == 1 {
        ISLAND_WEIGHT
    } else {
        0
    }
}

/// Inclusive window bounds, anchored 3 cells up-left of the edge minimum.
pub(super) fn sparse_window<V>(graph: &PixelGraph<V>, edge: Edge) -> ((i32, i32), (i32, i32)) {
    let (ax, ay) = graph.coord(edge.0);
    let (bx, by) = graph.coord(edge.1);
    let anchor = (ax.min(bx) - (SPARSE_WINDOW / 2 - 1), ay.min(by) - (SPARSE_WINDOW / 2 - 1));
    (
        anchor,
        (anchor.0 + SPARSE_WINDOW - 1, anchor.1 + SPARSE_WINDOW - 1),
    )
}

#[inline]
pub(super) fn in_window(coord: (i32, i32), min: (i32, i32), max: (i32, i32)) -> bool {
    (min.0..=max.0).contains(&coord.0) && (min.1..=max.1).contains(&coord.1)
}
