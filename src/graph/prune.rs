//! Methods for graph that prune edges which can never appear in a matching
//! at least as rank-good as the current one.
//!
//! The deletion rules come from the paper (section 2, the loop invariants of
//! the algorithm): once a node is Odd or Unreachable in some phase, every
//! rank-maximal matching leaves it matched exactly as the lower ranks
//! already determined, so edges that would let a later augmentation improve
//! it at an Even node's expense are deleted before the next rank is
//! revealed.

use log::debug;

use super::classify::Classification;
use super::edge::EdgeState;
use super::RankedBipartiteGraph;

impl RankedBipartiteGraph {
    /// Apply the paper's three deletion rules for the phase of the given
    /// rank and return how many edges were pruned:
    ///
    /// a. every unrevealed edge of rank greater than `phase_rank` incident
    ///    to an Odd or Unreachable node,
    /// b. every active edge between two Odd nodes,
    /// c. every active edge between an Odd node and an Unreachable node.
    ///
    /// Even-Even, Even-Odd and Even-Unreachable active edges survive.
    /// Matched edges always connect Odd to Even or lie inside an
    /// Unreachable pair, so rules b and c never break the matching.
    pub(crate) fn prune_with(
        &mut self,
        classification: &Classification,
        phase_rank: u32,
    ) -> usize {
        let mut pruned = 0;

        for edge in self.edges.iter_mut() {
            let blocked_a =
                classification.is_odd(edge.node_a) || classification.is_unreachable(edge.node_a);
            let blocked_b =
                classification.is_odd(edge.node_b) || classification.is_unreachable(edge.node_b);

            let doomed = match edge.state {
                EdgeState::Pruned => false,
                // Rule a: a higher-ranked edge cannot help an Odd or
                // Unreachable node anymore.
                EdgeState::Hidden => edge.rank > phase_rank && (blocked_a || blocked_b),
                // Rules b and c: Odd-Odd and Odd-Unreachable edges never
                // carry an alternating path that respects the secured ranks.
                EdgeState::Active => {
                    let odd_a = classification.is_odd(edge.node_a);
                    let odd_b = classification.is_odd(edge.node_b);

                    (odd_a && blocked_b) || (odd_b && blocked_a)
                }
            };

            if doomed {
                edge.state = EdgeState::Pruned;
                pruned += 1;
            }
        }

        debug!("pruned {pruned} edges at phase rank {phase_rank}");
        pruned
    }
}
