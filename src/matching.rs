//! A matching: a symmetric partial pairing between the nodes of a graph.
//!
//! Mutation only happens through the symmetric insert/remove operations, so
//! no half-paired state is ever observable from outside.

use std::collections::BTreeMap;

use crate::graph::RankedBipartiteGraph;

/// The evolving output of the algorithm.  `partner[v] == Some(w)` exactly
/// when `partner[w] == Some(v)`; free nodes map to None.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Matching {
    partner: Vec<Option<usize>>,
}

impl Matching {
    /// An empty matching over a graph of the given node count.
    pub fn new(node_count: usize) -> Self {
        Matching {
            partner: vec![None; node_count],
        }
    }

    /// Match two free nodes with each other.  Both directions are set
    /// atomically.
    ///
    /// Matching a node that already has a partner would corrupt the
    /// symmetric invariant, so it is a fatal programmer error rather than a
    /// recoverable one.
    pub fn insert(&mut self, node_a: usize, node_b: usize) {
        if node_a == node_b {
            panic!("cannot match node {node_a} with itself");
        }
        if let Some(partner) = self.partner[node_a] {
            panic!("cannot match node {node_a}: it is already matched to {partner}");
        }
        if let Some(partner) = self.partner[node_b] {
            panic!("cannot match node {node_b}: it is already matched to {partner}");
        }
        self.partner[node_a] = Some(node_b);
        self.partner[node_b] = Some(node_a);
    }

    /// Unmatch a node, clearing both directions.  Returns the old partner,
    /// or None if the node was already free.
    pub fn remove(&mut self, node_idx: usize) -> Option<usize> {
        let partner = self.partner[node_idx].take()?;
        self.partner[partner] = None;

        Some(partner)
    }

    /// The partner of a node, or None if it is free.
    pub fn partner(&self, node_idx: usize) -> Option<usize> {
        self.partner[node_idx]
    }

    pub fn is_free(&self, node_idx: usize) -> bool {
        self.partner[node_idx].is_none()
    }

    /// The number of matched pairs.
    pub fn len(&self) -> usize {
        self.partner.iter().flatten().count() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.partner.iter().all(|partner| partner.is_none())
    }

    /// Iterate over the matched pairs, each reported once with the lower
    /// node index first.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.partner
            .iter()
            .enumerate()
            .filter_map(|(node_idx, partner)| partner.map(|p| (node_idx, p)))
            .filter(|(node_idx, partner)| node_idx < partner)
    }

    /// How many matched edges the matching holds at each rank, keyed by rank.
    ///
    /// Ranks with no matched edge are absent from the map.  This is the
    /// profile the rank-maximal algorithm maximizes lexicographically.
    pub fn rank_profile(&self, graph: &RankedBipartiteGraph) -> BTreeMap<u32, usize> {
        let mut profile = BTreeMap::new();

        for (node_a, node_b) in self.pairs() {
            let edge_idx = graph
                .edge_between(node_a, node_b)
                .unwrap_or_else(|| panic!("matched pair ({node_a}, {node_b}) has no edge"));
            let rank = graph.get_edge(edge_idx).rank();

            *profile.entry(rank).or_insert(0) += 1;
        }
        profile
    }
}
