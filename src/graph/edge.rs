//! Represents a ranked edge connecting two nodes on opposite sides of a
//! bipartite graph.

/// Lifecycle of an edge across the phases of the algorithm.
///
/// The working graph G_i is mutated in place by moving edges through these
/// states rather than by deleting them, so edge indices stay stable for the
/// lifetime of the graph:
/// * revealing the next rank's edges is `Hidden` -> `Active`,
/// * pruning an edge is `Active` (or `Hidden`) -> `Pruned`, which is final.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EdgeState {
    /// The edge's rank has not been revealed to the working graph yet.
    Hidden,
    /// Part of the current working graph.
    Active,
    /// Deleted by the pruner.  A pruned edge is never revealed again.
    Pruned,
}

/// An edge connects two nodes of the graph and carries the preference rank
/// both endpoints assign to the pairing.  Rank 1 is the most preferred.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Edge {
    /// One endpoint.  This is an index into graph.nodes.
    pub(super) node_a: usize,
    /// The other endpoint.  This is an index into graph.nodes.
    pub(super) node_b: usize,
    /// Preference rank of this edge.  Validated positive at construction.
    pub(super) rank: u32,
    /// Where this edge currently is in its lifecycle.
    pub(super) state: EdgeState,
}

impl Edge {
    pub(super) fn new(node_a: usize, node_b: usize, rank: u32) -> Self {
        Edge {
            node_a,
            node_b,
            rank,
            state: EdgeState::Active,
        }
    }

    /// Given one endpoint of this edge, return the other.
    pub(super) fn other_end(&self, node_idx: usize) -> usize {
        debug_assert!(node_idx == self.node_a || node_idx == self.node_b);

        if node_idx == self.node_a {
            self.node_b
        } else {
            self.node_a
        }
    }

    pub(super) fn is_active(&self) -> bool {
        self.state == EdgeState::Active
    }

    pub(super) fn touches(&self, node_idx: usize) -> bool {
        node_idx == self.node_a || node_idx == self.node_b
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }
}
