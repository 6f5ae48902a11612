//! A ranked bipartite graph: the input model for rank-maximal matching as
//! described in the 2006 paper "Rank-Maximal Matchings" by Irving, Kavitha,
//! Mehlhorn, Michail and Paluch.
//!
//! This paper is referred to as simply "the paper" below.

mod augment;
mod classify;
mod edge;
mod node;
mod prune;

use std::collections::VecDeque;
use std::fmt::Display;

use itertools::Itertools;

use crate::error::Error;

pub use self::edge::{Edge, EdgeState};
pub use self::node::{Node, Side};

/// A simple undirected bipartite graph whose edges carry a positive integer
/// preference rank (rank 1 is the most preferred).
///
/// Indexed arrays are used throughout: nodes and edges are stored in flat
/// vectors and referenced by `usize` index.  Edges are never physically
/// removed; the phase loop mutates the working graph by moving edges through
/// the [`EdgeState`] lifecycle, so indices stay stable across phases.
#[derive(Debug, Clone, Default)]
pub struct RankedBipartiteGraph {
    /// All nodes in the graph.
    nodes: Vec<Node>,
    /// All edges in the graph.
    edges: Vec<Edge>,
}

impl RankedBipartiteGraph {
    pub fn new() -> Self {
        RankedBipartiteGraph {
            nodes: vec![],
            edges: vec![],
        }
    }

    /// Add a new node identified by name, and return the node's index in the graph.
    ///
    /// Pass `None` as the side to have it inferred from connectivity later;
    /// see [`RankedBipartiteGraph::infer_partition`].
    pub fn add_node(&mut self, name: &str, side: Option<Side>) -> usize {
        let new_node = Node::new(name, side);
        let idx = self.nodes.len();
        self.nodes.push(new_node);

        idx
    }

    /// Add a new node on the left side of the bipartition.
    pub fn add_left_node(&mut self, name: &str) -> usize {
        self.add_node(name, Some(Side::Left))
    }

    /// Add a new node on the right side of the bipartition.
    pub fn add_right_node(&mut self, name: &str) -> usize {
        self.add_node(name, Some(Side::Right))
    }

    /// Add a new node whose side will be inferred from connectivity.
    pub fn add_unsided_node(&mut self, name: &str) -> usize {
        self.add_node(name, None)
    }

    /// Add a new ranked edge between two nodes, and return the edge's index
    /// in the graph.
    ///
    /// Fails fast on the construction errors of the input model: a
    /// non-positive rank, an endpoint that is not a node, an edge between
    /// two nodes known to be on the same side, and a second edge between the
    /// same pair (only simple graphs are supported).
    pub fn add_edge(&mut self, node_a: usize, node_b: usize, rank: i32) -> Result<usize, Error> {
        if rank <= 0 {
            return Err(Error::InvalidEdgeRank { rank });
        }
        for index in [node_a, node_b] {
            if index >= self.nodes.len() {
                return Err(Error::UnknownVertex { index });
            }
        }
        if node_a == node_b {
            return Err(Error::MalformedGraph {
                reason: format!("node `{}` has an edge to itself", self.nodes[node_a].name),
            });
        }
        if let (Some(side_a), Some(side_b)) = (self.nodes[node_a].side, self.nodes[node_b].side) {
            if side_a == side_b {
                return Err(Error::MalformedGraph {
                    reason: format!(
                        "nodes `{}` and `{}` share an edge but are on the same side",
                        self.nodes[node_a].name, self.nodes[node_b].name
                    ),
                });
            }
        }
        if self.edge_between(node_a, node_b).is_some() {
            return Err(Error::DuplicateEdge {
                a: self.nodes[node_a].name.clone(),
                b: self.nodes[node_b].name.clone(),
            });
        }

        let new_edge = Edge::new(node_a, node_b, rank as u32);
        let idx = self.edges.len();
        self.edges.push(new_edge);

        self.nodes[node_a].add_edge(idx);
        self.nodes[node_b].add_edge(idx);

        Ok(idx)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Return the node indexed by node_idx.
    pub fn get_node(&self, node_idx: usize) -> &Node {
        &self.nodes[node_idx]
    }

    /// Return the name of the node indexed by node_idx.
    pub fn node_name(&self, node_idx: usize) -> &str {
        &self.nodes[node_idx].name
    }

    /// Return the edge indexed by edge_idx.
    pub fn get_edge(&self, edge_idx: usize) -> &Edge {
        &self.edges[edge_idx]
    }

    /// Return the node connected to this node by the given edge.
    pub fn get_connected_node(&self, node_idx: usize, edge_idx: usize) -> usize {
        self.edges[edge_idx].other_end(node_idx)
    }

    /// Return the edge between the two given nodes regardless of its state,
    /// or None if the pair is not connected.
    pub fn edge_between(&self, node_a: usize, node_b: usize) -> Option<usize> {
        self.nodes[node_a]
            .edges
            .iter()
            .cloned()
            .find(|&edge_idx| self.edges[edge_idx].touches(node_b))
    }

    /// Enumerate the neighbors of a node over active edges only, yielding
    /// `(edge_idx, neighbor_idx)` pairs in edge insertion order.
    pub fn active_neighbors(
        &self,
        node_idx: usize,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes[node_idx]
            .edges
            .iter()
            .cloned()
            .filter(move |&edge_idx| self.edges[edge_idx].is_active())
            .map(move |edge_idx| (edge_idx, self.edges[edge_idx].other_end(node_idx)))
    }

    /// Enumerate every edge of the full input graph as `(node_a, node_b, rank)`,
    /// regardless of lifecycle state.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.edges
            .iter()
            .map(|edge| (edge.node_a, edge.node_b, edge.rank))
    }

    /// The distinct rank values present in the graph, in increasing order.
    ///
    /// Ranks need not be contiguous or start at 1; the phase loop processes
    /// exactly these values.
    pub fn distinct_ranks(&self) -> Vec<u32> {
        self.edges
            .iter()
            .map(|edge| edge.rank)
            .sorted()
            .dedup()
            .collect()
    }

    /// Restrict the working graph to edges of rank <= max_rank: those become
    /// active, every other non-pruned edge is hidden.
    ///
    /// Used to build G_1 from the lowest rank present before the first phase.
    pub(crate) fn restrict_to_rank(&mut self, max_rank: u32) {
        for edge in self.edges.iter_mut() {
            if edge.state == EdgeState::Pruned {
                continue;
            }
            edge.state = if edge.rank <= max_rank {
                EdgeState::Active
            } else {
                EdgeState::Hidden
            };
        }
    }

    /// Reveal the edges of the given rank into the working graph and return
    /// how many were revealed.
    ///
    /// Only hidden edges are revealed; an edge the pruner already removed
    /// stays removed.
    pub(crate) fn reveal_rank(&mut self, rank: u32) -> usize {
        let mut revealed = 0;

        for edge in self.edges.iter_mut() {
            if edge.state == EdgeState::Hidden && edge.rank == rank {
                edge.state = EdgeState::Active;
                revealed += 1;
            }
        }
        revealed
    }

    /// Resolve the bipartition of the graph.
    ///
    /// Nodes added with an explicit side keep it; unsided nodes get a side by
    /// two-coloring their connected component, seeded from an explicitly
    /// sided member when one exists.  The two colorings of a seedless
    /// component are mirror images and produce the same matchings, so a
    /// single seedless component is colored arbitrarily; with several
    /// components in play a seedless one makes the partition ambiguous and
    /// is an error.
    ///
    /// Also validates bipartiteness: a same-side edge or an odd cycle is
    /// reported as [`Error::MalformedGraph`].
    pub fn infer_partition(&mut self) -> Result<(), Error> {
        let node_count = self.nodes.len();
        let mut assigned: Vec<Option<Side>> = self.nodes.iter().map(|node| node.side).collect();

        // Gather connected components (isolated nodes are components too).
        let mut visited = vec![false; node_count];
        let mut components: Vec<Vec<usize>> = vec![];
        for start in 0..node_count {
            if visited[start] {
                continue;
            }
            let mut members = vec![start];
            visited[start] = true;
            let mut head = 0;
            while head < members.len() {
                let node_idx = members[head];
                head += 1;
                for &edge_idx in &self.nodes[node_idx].edges {
                    let other_idx = self.edges[edge_idx].other_end(node_idx);
                    if !visited[other_idx] {
                        visited[other_idx] = true;
                        members.push(other_idx);
                    }
                }
            }
            components.push(members);
        }

        let seedless = |members: &Vec<usize>| members.iter().all(|&idx| assigned[idx].is_none());
        if components.len() > 1 && components.iter().any(seedless) {
            return Err(Error::AmbiguousPartition);
        }

        // Two-color each component from its seed.
        let mut queued = vec![false; node_count];
        for members in &components {
            let seed = members
                .iter()
                .cloned()
                .find(|&idx| assigned[idx].is_some())
                .unwrap_or(members[0]);
            if assigned[seed].is_none() {
                assigned[seed] = Some(Side::Left);
            }
            queued[seed] = true;

            let mut queue = VecDeque::from([seed]);
            while let Some(node_idx) = queue.pop_front() {
                let Some(node_side) = assigned[node_idx] else {
                    continue;
                };
                for &edge_idx in &self.nodes[node_idx].edges {
                    let other_idx = self.edges[edge_idx].other_end(node_idx);
                    match assigned[other_idx] {
                        Some(other_side) if other_side == node_side => {
                            return Err(Error::MalformedGraph {
                                reason: format!(
                                    "nodes `{}` and `{}` share an edge but are on the same side",
                                    self.nodes[node_idx].name, self.nodes[other_idx].name
                                ),
                            });
                        }
                        Some(_) => {}
                        None => assigned[other_idx] = Some(node_side.opposite()),
                    }
                    if !queued[other_idx] {
                        queued[other_idx] = true;
                        queue.push_back(other_idx);
                    }
                }
            }
        }

        for (node, side) in self.nodes.iter_mut().zip(assigned) {
            node.side = side;
        }
        Ok(())
    }

    /// The indexes of all nodes on the given side.  Only meaningful once the
    /// partition has been resolved.
    pub fn nodes_on_side(&self, side: Side) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.side == Some(side))
            .map(|(node_idx, _)| node_idx)
            .collect()
    }
}

impl Display for RankedBipartiteGraph {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        for edge in &self.edges {
            let a = &self.nodes[edge.node_a];
            let b = &self.nodes[edge.node_b];
            let marker = match edge.state {
                EdgeState::Hidden => "#",
                EdgeState::Active => "-",
                EdgeState::Pruned => "x",
            };

            let _ = writeln!(fmt, "{a} {marker}[{}]{marker} {b}", edge.rank);
        }
        Ok(())
    }
}

/// Additional test only functions for RankedBipartiteGraph to make graph
/// construction testing easier.
#[cfg(test)]
impl RankedBipartiteGraph {
    /// Build a sided graph from left node names, right node names, and
    /// `(left_name, right_name, rank)` edge triples.
    pub(crate) fn from_parts(
        lefts: &[&str],
        rights: &[&str],
        edges: &[(&str, &str, i32)],
    ) -> RankedBipartiteGraph {
        let mut graph = RankedBipartiteGraph::new();

        for name in lefts {
            graph.add_left_node(name);
        }
        for name in rights {
            graph.add_right_node(name);
        }
        for (a, b, rank) in edges {
            let a_idx = graph.name_to_node_idx(a).unwrap();
            let b_idx = graph.name_to_node_idx(b).unwrap();
            graph.add_edge(a_idx, b_idx, *rank).unwrap();
        }
        graph
    }

    /// Returns a node index given a node name.
    ///
    /// Expensive for large data sets: O(n)
    pub(crate) fn name_to_node_idx(&self, name: &str) -> Option<usize> {
        for (node_idx, node) in self.nodes.iter().enumerate() {
            if name == node.name {
                return Some(node_idx);
            }
        }
        None
    }

    /// The state of the edge between two named nodes.
    pub(crate) fn named_edge_state(&self, a: &str, b: &str) -> EdgeState {
        let a_idx = self.name_to_node_idx(a).unwrap();
        let b_idx = self.name_to_node_idx(b).unwrap();
        let edge_idx = self.edge_between(a_idx, b_idx).unwrap();

        self.edges[edge_idx].state
    }
}
