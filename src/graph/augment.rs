//! Methods for graph that grow a matching along augmenting alternating
//! paths.
//!
//! After a phase reveals the next rank's edges, the matching may no longer
//! be maximum on the working graph.  One augmenting search per free node
//! restores maximality: the pruning step already guaranteed no secured edge
//! ever needs to be broken, so growth only happens by flipping an
//! alternating path between two free nodes.

use std::collections::VecDeque;

use log::trace;

use super::RankedBipartiteGraph;
use crate::matching::Matching;

impl RankedBipartiteGraph {
    /// Search for an augmenting path from every still-free node in `free`
    /// and apply each one found, returning the number of augmentations.
    ///
    /// A node with no augmenting path now cannot gain one from a later
    /// augmentation elsewhere, so a single pass over the free nodes leaves
    /// the matching maximum on the current working graph.  Finding no path
    /// at all is the normal outcome of a phase with nothing to gain, not an
    /// error.
    pub(crate) fn augment(&self, matching: &mut Matching, free: &[usize]) -> usize {
        let mut applied = 0;

        for &start in free {
            if !matching.is_free(start) {
                continue;
            }
            if let Some(path) = self.find_augmenting_path(matching, start) {
                trace!("augmenting along {path:?}");
                apply_augmenting_path(&path, matching);
                applied += 1;
            }
        }
        applied
    }

    /// Breadth-first alternating search from one free node: non-matching
    /// active edges extend the path at even depth, the matching edge at odd
    /// depth.  Stops at the first other free node reached and returns the
    /// node path from `start` to it, or None if no augmenting path exists.
    fn find_augmenting_path(&self, matching: &Matching, start: usize) -> Option<Vec<usize>> {
        debug_assert!(matching.is_free(start));

        let mut parent: Vec<Option<usize>> = vec![None; self.node_count()];
        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::from([(start, true)]);
        visited[start] = true;

        while let Some((node_idx, even_depth)) = queue.pop_front() {
            if even_depth {
                for (_, other_idx) in self.active_neighbors(node_idx) {
                    if visited[other_idx] || matching.partner(node_idx) == Some(other_idx) {
                        continue;
                    }
                    visited[other_idx] = true;
                    parent[other_idx] = Some(node_idx);
                    if matching.is_free(other_idx) {
                        return Some(walk_back(&parent, other_idx));
                    }
                    queue.push_back((other_idx, false));
                }
            } else if let Some(partner_idx) = matching.partner(node_idx) {
                if !visited[partner_idx] {
                    visited[partner_idx] = true;
                    parent[partner_idx] = Some(node_idx);
                    queue.push_back((partner_idx, true));
                }
            }
        }
        None
    }
}

/// Reconstruct the path from the search start to `last` via parent links.
fn walk_back(parent: &[Option<usize>], last: usize) -> Vec<usize> {
    let mut path = vec![last];
    let mut cursor = last;

    while let Some(prev) = parent[cursor] {
        path.push(prev);
        cursor = prev;
    }
    path.reverse();
    path
}

/// Flip the matching along an augmenting path: the matched pairs inside the
/// path are removed first, then the free/matched status of every edge on the
/// path is inverted by matching consecutive pairs from the ends inward.
fn apply_augmenting_path(path: &[usize], matching: &mut Matching) {
    debug_assert!(path.len() >= 2 && path.len() % 2 == 0);

    for pair in path[1..path.len() - 1].chunks(2) {
        matching.remove(pair[0]);
    }
    for pair in path.chunks(2) {
        matching.insert(pair[0], pair[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_edge_between_free_nodes_is_taken() {
        let graph = RankedBipartiteGraph::from_parts(&["a1"], &["p1"], &[("a1", "p1", 1)]);
        let a1 = graph.name_to_node_idx("a1").unwrap();
        let p1 = graph.name_to_node_idx("p1").unwrap();
        let mut matching = Matching::new(graph.node_count());

        assert_eq!(graph.augment(&mut matching, &[a1, p1]), 1);
        assert_eq!(matching.partner(a1), Some(p1));
        assert_eq!(matching.len(), 1);
    }

    #[test]
    fn augmenting_path_rewires_an_existing_pair() {
        // a2 free, p2 free; growing requires flipping the matched a1-p1:
        // a2 - p1 (take) - a1 (drop) - p2 (take).
        let graph = RankedBipartiteGraph::from_parts(
            &["a1", "a2"],
            &["p1", "p2"],
            &[("a1", "p1", 1), ("a2", "p1", 1), ("a1", "p2", 1)],
        );
        let a1 = graph.name_to_node_idx("a1").unwrap();
        let a2 = graph.name_to_node_idx("a2").unwrap();
        let p1 = graph.name_to_node_idx("p1").unwrap();
        let p2 = graph.name_to_node_idx("p2").unwrap();
        let mut matching = Matching::new(graph.node_count());
        matching.insert(a1, p1);

        assert_eq!(graph.augment(&mut matching, &[a2, p2]), 1);
        assert_eq!(matching.len(), 2);
        assert_eq!(matching.partner(a2), Some(p1));
        assert_eq!(matching.partner(a1), Some(p2));
    }

    #[test]
    fn no_augmenting_path_leaves_the_matching_unchanged() {
        let graph = RankedBipartiteGraph::from_parts(
            &["a1", "a2"],
            &["p1"],
            &[("a1", "p1", 1), ("a2", "p1", 1)],
        );
        let a1 = graph.name_to_node_idx("a1").unwrap();
        let a2 = graph.name_to_node_idx("a2").unwrap();
        let p1 = graph.name_to_node_idx("p1").unwrap();
        let mut matching = Matching::new(graph.node_count());
        matching.insert(a1, p1);
        let before = matching.clone();

        assert_eq!(graph.augment(&mut matching, &[a2]), 0);
        assert_eq!(matching, before);
    }

    #[test]
    fn one_pass_over_free_nodes_reaches_a_maximum_matching() {
        // Empty matching over a 3x3 grid of edges: three augmentations.
        let graph = RankedBipartiteGraph::from_parts(
            &["a1", "a2", "a3"],
            &["p1", "p2", "p3"],
            &[
                ("a1", "p1", 1),
                ("a1", "p2", 1),
                ("a2", "p1", 1),
                ("a2", "p3", 1),
                ("a3", "p2", 1),
            ],
        );
        let free: Vec<usize> = (0..graph.node_count()).collect();
        let mut matching = Matching::new(graph.node_count());

        assert_eq!(graph.augment(&mut matching, &free), 3);
        assert_eq!(matching.len(), 3);
    }
}
