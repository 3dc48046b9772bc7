//! Interval-scored diagonal resolution.
//!
//! While several pairs are still undecided, a curve or sparsity walk that
//! reaches another ambiguous diagonal cannot know whether that diagonal
//! will survive. Each such encounter forks the walk into a world where the
//! diagonal is traversed and one where it is not; the weight becomes the
//! `(min, max)` interval over all terminal worlds. The fork is explicit
//! depth-first branching over stacked `(stack, seen)` snapshots, bounded by
//! the number of ambiguous edges met along the walk.

use std::collections::BTreeSet;

use crate::error::{Error, Result};

use super::heuristics::{
    apply_greedy, canonical, in_window, sparse_window, weight_island, Edge,
};
use super::types::{PixelGraph, PixelId};

/// Resolve `pairs` over repeated passes; remove losers as soon as a pair
/// becomes unambiguous so later pairs see the narrowed graph.
pub(super) fn apply_iterative<V>(
    graph: &mut PixelGraph<V>,
    mut pairs: Vec<[Edge; 2]>,
    greedy_fallback: bool,
) -> Result<()> {
    let mut ambiguous: BTreeSet<Edge> = pairs.iter().flatten().copied().collect();

    while !pairs.is_empty() {
        let mut pending: Vec<[Edge; 2]> = Vec::new();
        for pair in &pairs {
            let w0 = interval_weight(graph, &ambiguous, pair[0]);
            let w1 = interval_weight(graph, &ambiguous, pair[1]);
            // favour0 >= 0 resp. favour1 >= 0: edge 0 can resp. must win.
            let favour0 = w0.1 - w1.0;
            let favour1 = w0.0 - w1.1;
            let removals: &[Edge] = if favour0 == 0 && favour1 == 0 {
                &pair[..]
            } else if favour0 >= 0 && favour1 >= 0 {
                &pair[1..]
            } else if favour0 <= 0 && favour1 <= 0 {
                &pair[..1]
            } else {
                pending.push(*pair);
                continue;
            };
            for &(a, b) in removals {
                graph.remove_edge(a, b);
            }
            ambiguous.remove(&pair[0]);
            ambiguous.remove(&pair[1]);
        }
        if pending.len() == pairs.len() {
            if greedy_fallback {
                apply_greedy(graph, &pending);
                return Ok(());
            }
            return Err(Error::Unresolvable(pending.len()));
        }
        pairs = pending;
    }
    Ok(())
}

pub(super) fn interval_weight<V>(
    graph: &PixelGraph<V>,
    ambiguous: &BTreeSet<Edge>,
    edge: Edge,
) -> (i64, i64) {
    let curve = weight_curve_interval(graph, ambiguous, edge);
    let sparse = weight_sparse_interval(graph, ambiguous, edge);
    let island = weight_island(graph, edge);
    (curve.0 + sparse.0 + island, curve.1 + sparse.1 + island)
}

pub(super) fn weight_curve_interval<V>(
    graph: &PixelGraph<V>,
    ambiguous: &BTreeSet<Edge>,
    edge: Edge,
) -> (i64, i64) {
    let mut terminals = Vec::new();
    let mut worlds: Vec<(Vec<PixelId>, BTreeSet<Edge>)> =
        vec![(vec![edge.0, edge.1], BTreeSet::from([edge]))];
    while let Some((mut stack, mut seen)) = worlds.pop() {
        while let Some(node) = stack.pop() {
            if graph.degree(node) != 2 {
                continue;
            }
            for &next in graph.neighbors(node) {
                let e = canonical(node, next);
                if seen.insert(e) {
                    if ambiguous.contains(&e) {
                        // World where the walk stops at this diagonal.
                        worlds.push((stack.clone(), seen.clone()));
                    }
                    stack.push(next);
                }
            }
        }
        terminals.push(seen.len() as i64);
    }
    min_max(&terminals)
}

pub(super) fn weight_sparse_interval<V>(
    graph: &PixelGraph<V>,
    ambiguous: &BTreeSet<Edge>,
    edge: Edge,
) -> (i64, i64) {
    let (window_min, window_max) = sparse_window(graph, edge);
    let mut terminals = Vec::new();
    let mut worlds: Vec<(Vec<PixelId>, BTreeSet<PixelId>)> = vec![(
        vec![edge.0, edge.1],
        BTreeSet::from([edge.0, edge.1]),
    )];
    while let Some((mut stack, mut seen)) = worlds.pop() {
        while let Some(node) = stack.pop() {
            for &next in graph.neighbors(node) {
                if seen.contains(&next) {
                    continue;
                }
                if ambiguous.contains(&canonical(node, next)) {
                    // World where this diagonal is absent.
                    worlds.push((stack.clone(), seen.clone()));
                }
                if in_window(graph.coord(next), window_min, window_max) {
                    seen.insert(next);
                    stack.push(next);
                }
            }
        }
        terminals.push(-(seen.len() as i64));
    }
    min_max(&terminals)
}

fn min_max(values: &[i64]) -> (i64, i64) {
    let mut lo = i64::MAX;
    let mut hi = i64::MIN;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}
