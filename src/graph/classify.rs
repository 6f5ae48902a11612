//! Methods for graph that classify nodes as Even, Odd or Unreachable.
//!
//! The paper partitions the nodes of the working graph G_i, relative to a
//! maximum matching and the free nodes of the first phase, by alternating
//! reachability:
//! * a node first reached from a free node by an alternating path of even
//!   length is Even (free nodes themselves are Even, at length 0),
//! * a node first reached at odd length is Odd,
//! * a node no alternating path reaches is Unreachable.
//!
//! Because the matching is maximum on G_i, no node is reachable at both
//! parities, so first-visit-wins search produces the canonical partition no
//! matter the order the free nodes are scanned in.

use std::collections::VecDeque;

use log::debug;

use super::RankedBipartiteGraph;
use crate::matching::Matching;

/// Which class a node fell into, relative to a matching and a free-node set.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Label {
    /// Reachable from a free node by an even-length alternating path.
    Even,
    /// Reachable from a free node by an odd-length alternating path.
    Odd,
    /// Not reachable from any free node by an alternating path.
    Unreachable,
}

/// The partition of all nodes of a graph into the three classes.
///
/// Stored as a per-node tag array indexed by node index, so membership is an
/// O(1) lookup and a node can never test positive for two classes at once.
/// Recomputed fresh each phase; carries no state across phases.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Classification {
    labels: Vec<Label>,
}

impl Classification {
    pub fn label(&self, node_idx: usize) -> Label {
        self.labels[node_idx]
    }

    pub fn is_even(&self, node_idx: usize) -> bool {
        self.labels[node_idx] == Label::Even
    }

    pub fn is_odd(&self, node_idx: usize) -> bool {
        self.labels[node_idx] == Label::Odd
    }

    pub fn is_unreachable(&self, node_idx: usize) -> bool {
        self.labels[node_idx] == Label::Unreachable
    }

    /// Counts of (even, odd, unreachable) nodes.
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);

        for label in &self.labels {
            match label {
                Label::Even => counts.0 += 1,
                Label::Odd => counts.1 += 1,
                Label::Unreachable => counts.2 += 1,
            }
        }
        counts
    }
}

impl RankedBipartiteGraph {
    /// Partition all nodes into Even / Odd / Unreachable by a multi-source
    /// alternating search from the given free nodes.
    ///
    /// The search walks an explicit worklist instead of recursing: from an
    /// Even node only non-matching active edges extend the path, from an Odd
    /// node only the matching edge does.  Free nodes are scanned in the
    /// order given and incident edges in insertion order, so the visitation
    /// order is deterministic for a given input.
    ///
    /// `free` is the free-node set of the first phase.  Members that a later
    /// augmentation has since matched are skipped: no new free node ever
    /// appears across phases, so the still-free members of the original set
    /// are exactly the free nodes of the current matching.
    ///
    /// Total over any graph/matching/free-set triple; an empty graph yields
    /// an empty classification.
    pub(crate) fn classify(&self, matching: &Matching, free: &[usize]) -> Classification {
        let mut labels: Vec<Option<Label>> = vec![None; self.node_count()];
        let mut queue = VecDeque::new();

        for &free_idx in free {
            if matching.is_free(free_idx) && labels[free_idx].is_none() {
                labels[free_idx] = Some(Label::Even);
                queue.push_back(free_idx);
            }
        }

        while let Some(node_idx) = queue.pop_front() {
            match labels[node_idx] {
                Some(Label::Even) => {
                    for (_, other_idx) in self.active_neighbors(node_idx) {
                        if matching.partner(node_idx) == Some(other_idx) {
                            continue;
                        }
                        if labels[other_idx].is_none() {
                            labels[other_idx] = Some(Label::Odd);
                            queue.push_back(other_idx);
                        }
                    }
                }
                Some(Label::Odd) => {
                    if let Some(partner_idx) = matching.partner(node_idx) {
                        if labels[partner_idx].is_none() {
                            labels[partner_idx] = Some(Label::Even);
                            queue.push_back(partner_idx);
                        }
                    }
                }
                _ => unreachable!("only labeled nodes are queued"),
            }
        }

        let classification = Classification {
            labels: labels
                .into_iter()
                .map(|label| label.unwrap_or(Label::Unreachable))
                .collect(),
        };

        let (even, odd, unreachable) = classification.counts();
        debug!("classified nodes: {even} even, {odd} odd, {unreachable} unreachable");

        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_nodes_are_even_at_length_zero() {
        let graph = RankedBipartiteGraph::from_parts(&["a1"], &["p1"], &[("a1", "p1", 1)]);
        let matching = Matching::new(graph.node_count());
        let free = vec![graph.name_to_node_idx("a1").unwrap(), graph.name_to_node_idx("p1").unwrap()];

        let classification = graph.classify(&matching, &free);

        assert!(classification.is_even(free[0]));
        assert!(classification.is_even(free[1]));
    }

    #[test]
    fn alternating_reachability_assigns_odd_and_even() {
        // a2 is free; p1 is one non-matching edge away (odd), and a1 one
        // further matching edge away (even).
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

        let classification = graph.classify(&matching, &[a2]);

        assert_eq!(classification.label(a2), Label::Even);
        assert_eq!(classification.label(p1), Label::Odd);
        assert_eq!(classification.label(a1), Label::Even);
        assert_eq!(classification.counts(), (2, 1, 0));
    }

    #[test]
    fn matched_pairs_cut_off_from_free_nodes_are_unreachable() {
        let graph = RankedBipartiteGraph::from_parts(
            &["a1", "a2"],
            &["p1", "p2"],
            &[("a1", "p1", 1), ("a2", "p2", 1)],
        );
        let a1 = graph.name_to_node_idx("a1").unwrap();
        let p1 = graph.name_to_node_idx("p1").unwrap();
        let a2 = graph.name_to_node_idx("a2").unwrap();
        let p2 = graph.name_to_node_idx("p2").unwrap();
        let mut matching = Matching::new(graph.node_count());
        matching.insert(a1, p1);
        matching.insert(a2, p2);

        // No free nodes at all: everything is unreachable.
        let classification = graph.classify(&matching, &[]);
        assert_eq!(classification.counts(), (0, 0, 4));
    }

    #[test]
    fn classification_ignores_hidden_edges() {
        let mut graph = RankedBipartiteGraph::from_parts(
            &["a1", "a2"],
            &["p1"],
            &[("a1", "p1", 1), ("a2", "p1", 2)],
        );
        let a1 = graph.name_to_node_idx("a1").unwrap();
        let a2 = graph.name_to_node_idx("a2").unwrap();
        let p1 = graph.name_to_node_idx("p1").unwrap();
        graph.restrict_to_rank(1);
        let mut matching = Matching::new(graph.node_count());
        matching.insert(a1, p1);

        // The rank-2 edge from the free node a2 is hidden, so nothing is
        // reachable from a2.
        let classification = graph.classify(&matching, &[a2]);

        assert_eq!(classification.label(a2), Label::Even);
        assert_eq!(classification.label(p1), Label::Unreachable);
        assert_eq!(classification.label(a1), Label::Unreachable);
    }

    #[test]
    fn empty_graph_yields_empty_classification() {
        let graph = RankedBipartiteGraph::new();
        let matching = Matching::new(0);

        let classification = graph.classify(&matching, &[]);

        assert_eq!(classification.counts(), (0, 0, 0));
    }
}
