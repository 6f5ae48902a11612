//! Represents a node (vertex) on one side of a ranked bipartite graph.

use std::fmt::Display;

/// Which side of the bipartition a node belongs to.
///
/// Side membership is fixed for the algorithm's lifetime.  It is either
/// supplied when the node is added or inferred from connectivity by
/// `RankedBipartiteGraph::infer_partition`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Represents the node element of a graph.  Sometimes called a vertex.
///
/// Nodes are connected together via ranked edges.  Each node keeps the list
/// of its incident edges as indices into the graph's edges list; because
/// edges are unordered pairs, each edge appears in the list of both of its
/// endpoints.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Node {
    /// Arbitrary name set by the user.  Duplicates are possible, and up to the user to control.
    pub(super) name: String,
    /// Which side of the bipartition this node is on.  None until the
    /// partition has been supplied or inferred.
    pub(super) side: Option<Side>,
    /// Edges incident to this node.  Each entry is an edge index into the graph's edges list.
    pub(super) edges: Vec<usize>,
}

impl Node {
    /// Return a new node which is not yet connected to a graph.
    pub(super) fn new(name: &str, side: Option<Side>) -> Self {
        Node {
            name: name.to_string(),
            side,
            edges: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Record an incident edge on this node.
    pub(super) fn add_edge(&mut self, edge_idx: usize) {
        self.edges.push(edge_idx);
    }
}

impl Display for Node {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        let side = match self.side {
            Some(Side::Left) => "L",
            Some(Side::Right) => "R",
            None => "?",
        };
        write!(fmt, "{}[{side}]", &self.name)
    }
}
