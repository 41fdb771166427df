//! Exhaustive permutation search.
//!
//! # Algorithm
//!
//! Enumerates every ordering of the non-start locations in lexicographic id
//! order, wraps each as `start -> ordering -> start`, and evaluates it. The
//! running optimum is replaced only by a strictly smaller `(distance, time)`
//! pair, so among equal tours the lexicographically first ordering wins.
//!
//! # Complexity
//!
//! O((n-1)! · n) time, O(n) memory. Bounded by
//! [`SolverConfig::max_brute_force_locations`].

use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::evaluation::PathEvaluator;
use crate::models::{Graph, LocationId, PathCost, SolveOutcome, Tour};
use crate::solver::scope;

use super::permutation::next_permutation;

/// Finds the optimal tour over every location of the graph.
///
/// # Examples
///
/// ```
/// use u_tsptw::models::Graph;
/// use u_tsptw::exact::brute_force;
/// use u_tsptw::SolverConfig;
///
/// let mut graph = Graph::new();
/// let a = graph.add_location("A", 0, 20).unwrap();
/// graph.add_location("B", 5, 10).unwrap();
/// graph.add_location("C", 12, 20).unwrap();
/// graph.connect("A", "B", 1, 1).unwrap();
/// graph.connect("B", "C", 1, 1).unwrap();
/// graph.connect("C", "A", 1, 1).unwrap();
///
/// let tour = brute_force(&graph, a, &SolverConfig::default())
///     .unwrap()
///     .into_tour()
///     .unwrap();
/// assert_eq!(tour.names(&graph), vec!["A", "B", "C", "A"]);
/// assert_eq!(tour.distance(), 3);
/// ```
pub fn brute_force(
    graph: &Graph,
    start: LocationId,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    brute_force_subset(graph, start, None, config)
}

/// Finds the optimal tour from `start` through the given locations only.
///
/// `subset = None` means every location. The start is implied and may be
/// omitted from the subset; duplicates are ignored.
pub fn brute_force_subset(
    graph: &Graph,
    start: LocationId,
    subset: Option<&[LocationId]>,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    let candidates = scope(graph, start, subset)?;
    config.check_brute_force(candidates.len() + 1)?;
    debug!(candidates = candidates.len(), "brute force search");

    if candidates.is_empty() {
        return Ok(SolveOutcome::Feasible(Tour::single(start)));
    }

    let eval = PathEvaluator::new(graph);
    let outcome: SolveOutcome = best_path(&eval, start, &candidates, 0, true)
        .map(|(stops, cost)| Tour::new(stops, cost))
        .into();
    debug!(cost = ?outcome.cost(), "brute force finished");
    Ok(outcome)
}

/// Best sequence leaving `anchor` at `start_time` and visiting every
/// candidate, returning to `anchor` when `close` is set.
///
/// The returned path starts with `anchor` (and ends with it if closed).
pub(crate) fn best_path(
    eval: &PathEvaluator<'_>,
    anchor: LocationId,
    candidates: &[LocationId],
    start_time: i64,
    close: bool,
) -> Option<(Vec<LocationId>, PathCost)> {
    let mut order = candidates.to_vec();
    order.sort_unstable();

    let mut path = Vec::with_capacity(order.len() + 2);
    let mut best: Option<(Vec<LocationId>, PathCost)> = None;

    loop {
        path.clear();
        path.push(anchor);
        path.extend_from_slice(&order);
        if close {
            path.push(anchor);
        }

        if let Some(cost) = eval.evaluate_from(&path, start_time) {
            if best.as_ref().is_none_or(|(_, b)| cost < *b) {
                trace!(distance = cost.distance, time = cost.time, "new best ordering");
                best = Some((path.clone(), cost));
            }
        }

        if !next_permutation(&mut order) {
            break;
        }
    }

    best
}
