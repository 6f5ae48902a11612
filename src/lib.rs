//! Rank-maximal matchings on ranked bipartite graphs.
//!
//! A ranked bipartite graph pairs two disjoint node sets with edges labeled
//! by a positive integer preference rank, 1 being the most preferred.  A
//! rank-maximal matching contains, among all matchings, the maximum number
//! of rank-1 edges; subject to that, the maximum number of rank-2 edges;
//! and so on lexicographically through every rank present.  This models
//! two-sided assignment problems, such as applicants to posts, where
//! optimality is judged rank by rank rather than by a single scalar weight.
//!
//! The implementation follows the algorithm of the 2006 paper
//! "Rank-Maximal Matchings" by Irving, Kavitha, Mehlhorn, Michail and
//! Paluch (ACM Transactions on Algorithms): an initial maximum matching on
//! the rank-1 subgraph is refined phase by phase, classifying nodes by
//! alternating reachability, pruning edges that can no longer help, and
//! re-augmenting as each rank's edges are revealed.
//!
//! ```
//! use rmm_rs::{rank_maximal_matching, RankedBipartiteGraph};
//!
//! let mut graph = RankedBipartiteGraph::new();
//! let a1 = graph.add_left_node("a1");
//! let a2 = graph.add_left_node("a2");
//! let p1 = graph.add_right_node("p1");
//! let p2 = graph.add_right_node("p2");
//! graph.add_edge(a1, p1, 2).unwrap();
//! graph.add_edge(a1, p2, 1).unwrap();
//! graph.add_edge(a2, p2, 2).unwrap();
//!
//! let matching = rank_maximal_matching(&graph).unwrap();
//! assert_eq!(matching["a1"], "p2");
//! assert_eq!(matching["p2"], "a1");
//! ```

mod error;
mod graph;
mod hopcroft_karp;
mod matching;
mod rank_maximal;

pub use error::Error;
pub use graph::{Edge, EdgeState, Node, RankedBipartiteGraph, Side};
pub use matching::Matching;
pub use rank_maximal::{rank_maximal_matching, solve_rank_maximal};
