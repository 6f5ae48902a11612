//! Errors reported while constructing or validating a ranked bipartite graph.
//!
//! All of these are detected at construction time or when the bipartition is
//! resolved, before the phase loop starts.  The phase loop itself runs on a
//! validated graph and treats any remaining inconsistency as a programmer
//! error (a panic), not a recoverable condition.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The graph is disconnected and no node carries an explicit side, so the
    /// bipartition cannot be uniquely inferred.
    #[error("graph is disconnected and no explicit bipartition was supplied")]
    AmbiguousPartition,

    /// Edge ranks must be positive integers; rank 1 is the most preferred.
    #[error("edge rank must be a positive integer, got {rank}")]
    InvalidEdgeRank { rank: i32 },

    /// The graph is not bipartite: an edge connects two nodes on the same
    /// side, or two-coloring found an odd cycle.
    #[error("graph is not bipartite: {reason}")]
    MalformedGraph { reason: String },

    /// Only simple graphs are supported: at most one edge per node pair.
    #[error("an edge between `{a}` and `{b}` already exists")]
    DuplicateEdge { a: String, b: String },

    /// An edge endpoint index does not refer to a node of the graph.
    #[error("edge endpoint {index} is not a node of the graph")]
    UnknownVertex { index: usize },
}
