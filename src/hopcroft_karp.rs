//! Maximum-cardinality bipartite matching via the Hopcroft-Karp algorithm.
//!
//! The rank-maximal phase loop only needs this as a black box with a simple
//! contract: given a bipartite graph with its partition resolved, return a
//! maximum matching over the active edges as a symmetric pairing.  Layered
//! BFS from the free left nodes finds the shortest augmenting-path length,
//! then DFS augments along the layers; the rounds repeat until no
//! augmenting path remains.
//!
//! <https://en.wikipedia.org/wiki/Hopcroft%E2%80%93Karp_algorithm>

use std::collections::VecDeque;

use crate::graph::{RankedBipartiteGraph, Side};
use crate::matching::Matching;

const UNLAYERED: usize = usize::MAX;

/// Compute a maximum matching of the graph's active edges.
///
/// The graph's bipartition must already be resolved (every node sided).
pub(crate) fn hopcroft_karp(graph: &RankedBipartiteGraph) -> Matching {
    let lefts = graph.nodes_on_side(Side::Left);
    let mut matching = Matching::new(graph.node_count());
    let mut layer = vec![UNLAYERED; graph.node_count()];

    while layer_free_lefts(graph, &lefts, &matching, &mut layer) {
        let mut progressed = false;
        for &left_idx in &lefts {
            if matching.is_free(left_idx) && augment_from(graph, left_idx, &mut matching, &mut layer)
            {
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
    matching
}

/// BFS over alternating paths from the free left nodes, recording the layer
/// (alternating distance) of every left node reached.  Returns true if some
/// free right node is reachable, i.e. an augmenting path exists.
fn layer_free_lefts(
    graph: &RankedBipartiteGraph,
    lefts: &[usize],
    matching: &Matching,
    layer: &mut [usize],
) -> bool {
    let mut queue = VecDeque::new();

    layer.fill(UNLAYERED);
    for &left_idx in lefts {
        if matching.is_free(left_idx) {
            layer[left_idx] = 0;
            queue.push_back(left_idx);
        }
    }

    let mut reachable_free_right = false;
    while let Some(left_idx) = queue.pop_front() {
        for (_, right_idx) in graph.active_neighbors(left_idx) {
            match matching.partner(right_idx) {
                None => reachable_free_right = true,
                Some(next_left) if layer[next_left] == UNLAYERED => {
                    layer[next_left] = layer[left_idx] + 1;
                    queue.push_back(next_left);
                }
                Some(_) => {}
            }
        }
    }
    reachable_free_right
}

/// DFS from one free left node along the layers built by the BFS, rewiring
/// matched pairs as the recursion unwinds.  Returns true if an augmenting
/// path was found and applied.
fn augment_from(
    graph: &RankedBipartiteGraph,
    left_idx: usize,
    matching: &mut Matching,
    layer: &mut [usize],
) -> bool {
    for (_, right_idx) in graph.active_neighbors(left_idx) {
        if matching.is_free(right_idx) {
            matching.insert(left_idx, right_idx);
            return true;
        }
    }
    for (_, right_idx) in graph.active_neighbors(left_idx) {
        let Some(next_left) = matching.partner(right_idx) else {
            continue;
        };
        if layer[next_left] != layer[left_idx] + 1 {
            continue;
        }
        // Free the pair before recursing so the matching never holds a node
        // with two partners; restore it if the deeper search fails.
        matching.remove(right_idx);
        if augment_from(graph, next_left, matching, layer) {
            matching.insert(left_idx, right_idx);
            return true;
        }
        matching.insert(next_left, right_idx);
    }

    // Dead end: take this node out of the layering for the rest of the round.
    layer[left_idx] = UNLAYERED;
    false
}
