//! The phase loop of the rank-maximal matching algorithm from the paper.
//!
//! Phase i works on G_i, the graph holding every surviving edge of rank <= i.
//! Starting from a maximum matching of G_1, each phase classifies the nodes,
//! prunes the edges the classification proves useless, reveals the next
//! rank, and re-augments.  An edge secured at a lower rank is never given up
//! for a higher one, so the final matching maximizes the number of rank-1
//! edges, then rank-2 edges, and so on lexicographically.

use std::collections::HashMap;

use log::debug;

use crate::error::Error;
use crate::graph::RankedBipartiteGraph;
use crate::hopcroft_karp::hopcroft_karp;
use crate::matching::Matching;

/// Compute a rank-maximal matching of the graph and return it as a
/// symmetric name-to-name mapping: `result["a1"] == "p2"` exactly when
/// `result["p2"] == "a1"`.  Unmatched nodes are absent.
///
/// The input graph is not modified; validation errors (ambiguous partition,
/// non-bipartite structure) surface before any phase runs.
pub fn rank_maximal_matching(
    graph: &RankedBipartiteGraph,
) -> Result<HashMap<String, String>, Error> {
    let mut working = graph.clone();
    let matching = solve_rank_maximal(&mut working)?;

    let mut result = HashMap::new();
    for (node_a, node_b) in matching.pairs() {
        let name_a = working.node_name(node_a).to_string();
        let name_b = working.node_name(node_b).to_string();
        result.insert(name_a.clone(), name_b.clone());
        result.insert(name_b, name_a);
    }
    Ok(result)
}

/// The index-level entry point: run the phase loop in place on the given
/// graph and return the rank-maximal matching over node indexes.
///
/// The graph is left in its final working state (edges of every rank
/// revealed or pruned), which is useful for inspecting what the algorithm
/// kept; callers who need the original graph afterwards should clone it
/// first, as [`rank_maximal_matching`] does.
pub fn solve_rank_maximal(graph: &mut RankedBipartiteGraph) -> Result<Matching, Error> {
    graph.infer_partition()?;

    let ranks = graph.distinct_ranks();
    let Some((&first_rank, later_ranks)) = ranks.split_first() else {
        return Ok(Matching::new(graph.node_count()));
    };

    // G_1 and its maximum matching; the free nodes are fixed here for the
    // whole run.  A node matched in a maximum matching of G_i stays matched
    // in every later phase, so classification and augmentation are always
    // taken relative to this set.
    graph.restrict_to_rank(first_rank);
    let mut matching = hopcroft_karp(graph);
    let free: Vec<usize> = (0..graph.node_count())
        .filter(|&node_idx| matching.is_free(node_idx))
        .collect();
    debug!(
        "phase rank {first_rank}: initial maximum matching of {} pairs, {} free nodes",
        matching.len(),
        free.len()
    );

    let mut phase_rank = first_rank;
    for &rank in later_ranks {
        let classification = graph.classify(&matching, &free);
        let pruned = graph.prune_with(&classification, phase_rank);
        let revealed = graph.reveal_rank(rank);
        let grown = graph.augment(&mut matching, &free);

        debug!(
            "phase rank {rank}: pruned {pruned}, revealed {revealed}, \
             augmented {grown} times to {} pairs",
            matching.len()
        );
        phase_rank = rank;
    }

    Ok(matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn profile_of(
        lefts: &[&str],
        rights: &[&str],
        edges: &[(&str, &str, i32)],
    ) -> Vec<(u32, usize)> {
        let mut graph = RankedBipartiteGraph::from_parts(lefts, rights, edges);
        let full_graph = graph.clone();
        let matching = solve_rank_maximal(&mut graph).unwrap();

        matching.rank_profile(&full_graph).into_iter().collect()
    }

    #[test]
    fn a_secured_rank_is_never_traded_for_two_lower_ones() {
        // a1 alone can take p1 at rank 1.  A size-2 matching exists using
        // ranks {2, 2}, but rank-maximality keeps the single rank-1 edge
        // and then still matches a2 at rank 2 where possible.
        let profile = profile_of(
            &["a1", "a2"],
            &["p1", "p2"],
            &[("a1", "p1", 1), ("a1", "p2", 2), ("a2", "p1", 2)],
        );
        assert_eq!(profile, vec![(1, 1)]);
    }

    #[test]
    fn later_ranks_fill_in_around_the_rank_one_core() {
        let profile = profile_of(
            &["a1", "a2"],
            &["p1", "p2"],
            &[("a1", "p1", 1), ("a2", "p1", 2), ("a2", "p2", 3)],
        );
        assert_eq!(profile, vec![(1, 1), (3, 1)]);
    }

    #[rstest(gap_rank, case(2), case(5), case(100))]
    fn ranks_need_not_be_contiguous(gap_rank: i32) {
        let profile = profile_of(
            &["a1", "a2"],
            &["p1", "p2"],
            &[("a1", "p1", 1), ("a2", "p2", gap_rank)],
        );
        assert_eq!(profile, vec![(1, 1), (gap_rank as u32, 1)]);
    }

    #[test]
    fn graph_without_edges_yields_an_empty_matching() {
        let mut graph = RankedBipartiteGraph::new();
        graph.add_left_node("a1");
        graph.add_right_node("p1");

        let matching = solve_rank_maximal(&mut graph).unwrap();
        assert!(matching.is_empty());
    }

    #[test]
    fn rank_counts_never_decrease_as_phases_proceed() {
        // Run the loop on prefixes of the rank set by filtering the input
        // edges, and check the counts of already-processed ranks are stable.
        let edges = [
            ("a1", "p1", 1),
            ("a1", "p2", 2),
            ("a2", "p2", 1),
            ("a2", "p3", 3),
            ("a3", "p2", 2),
            ("a3", "p3", 1),
        ];
        let lefts = ["a1", "a2", "a3"];
        let rights = ["p1", "p2", "p3"];

        let mut previous: Vec<(u32, usize)> = vec![];
        for max_rank in 1..=3 {
            let prefix: Vec<_> = edges
                .iter()
                .filter(|(_, _, rank)| *rank <= max_rank)
                .cloned()
                .collect();
            let profile = profile_of(&lefts, &rights, &prefix);

            for (rank, count) in &previous {
                let now = profile
                    .iter()
                    .find(|(r, _)| r == rank)
                    .map(|(_, c)| *c)
                    .unwrap_or(0);
                assert!(
                    now >= *count,
                    "count at rank {rank} dropped from {count} to {now}"
                );
            }
            previous = profile;
        }
    }

    #[test]
    fn name_map_is_symmetric() {
        let graph = RankedBipartiteGraph::from_parts(
            &["a1", "a2"],
            &["p1", "p2"],
            &[("a1", "p1", 1), ("a2", "p2", 1)],
        );

        let result = rank_maximal_matching(&graph).unwrap();

        assert_eq!(result.len(), 4);
        for (name_a, name_b) in &result {
            assert_eq!(result.get(name_b), Some(name_a));
        }
    }
}
