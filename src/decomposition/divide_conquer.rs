//! Recursive divide & conquer tour construction.
//!
//! # Algorithm
//!
//! The candidate locations (start excluded) are taken in the given order.
//! A candidate set no larger than the base-case size is solved exactly by
//! permutation search anchored at the current location. A larger set is cut
//! at its midpoint; the first half is solved from the anchor, the second half
//! from the last stop of the first half's path (with the clock where that path
//! ended), and the two paths are merged:
//!
//! 1. each stop of the second path is appended in order, skipping stops
//!    already present;
//! 2. every appended stop must be connected to the previous one and reached
//!    within its window, waiting if early;
//! 3. the complete path must return to the true start within its window.
//!
//! Any failure aborts the whole call; no other partition is tried. The cut is
//! structural rather than cost-aware, so the result may be worse than optimal,
//! or missing even when a feasible tour exists.
//!
//! # Complexity
//!
//! O(n · b! · b) for base-case size b, plus O(n log n) merge work.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::evaluation::PathEvaluator;
use crate::exact::best_path;
use crate::models::{Graph, LocationId, PathCost, SolveOutcome, Tour};
use crate::solver::scope;

/// Builds a tour over every location by recursive halving.
///
/// Candidates are split in location id order.
///
/// # Examples
///
/// ```
/// use u_tsptw::models::Graph;
/// use u_tsptw::decomposition::divide_and_conquer;
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
/// let tour = divide_and_conquer(&graph, a, &SolverConfig::default())
///     .unwrap()
///     .into_tour()
///     .unwrap();
/// assert_eq!(tour.names(&graph), vec!["A", "B", "C", "A"]);
/// ```
pub fn divide_and_conquer(
    graph: &Graph,
    start: LocationId,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    divide_and_conquer_subset(graph, start, None, config)
}

/// Builds a tour from `start` through the given locations by recursive halving.
///
/// The subset order decides where the halves are cut. `subset = None` means
/// every location in id order.
pub fn divide_and_conquer_subset(
    graph: &Graph,
    start: LocationId,
    subset: Option<&[LocationId]>,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    let candidates = scope(graph, start, subset)?;
    let base = config.divide_base_case.max(1);
    debug!(candidates = candidates.len(), base, "divide and conquer");

    if candidates.is_empty() {
        return Ok(SolveOutcome::Feasible(Tour::single(start)));
    }

    let eval = PathEvaluator::new(graph);
    if candidates.len() <= base {
        let outcome = best_path(&eval, start, &candidates, 0, true)
            .map(|(stops, cost)| Tour::new(stops, cost))
            .into();
        return Ok(outcome);
    }

    let Some((mut stops, cost)) = solve_open(&eval, start, &candidates, 0, base) else {
        debug!("divide and conquer found no feasible partition");
        return Ok(SolveOutcome::NoFeasibleTour);
    };
    let last = stops.last().copied().unwrap_or(start);
    let Some(closed) = eval.extend(cost, last, start) else {
        debug!(at = %last, "divide and conquer cannot return to start");
        return Ok(SolveOutcome::NoFeasibleTour);
    };
    stops.push(start);
    debug!(distance = closed.distance, time = closed.time, "divide and conquer finished");
    Ok(SolveOutcome::Feasible(Tour::new(stops, closed)))
}

/// Open path leaving `anchor` at `start_time` through every candidate.
fn solve_open(
    eval: &PathEvaluator<'_>,
    anchor: LocationId,
    candidates: &[LocationId],
    start_time: i64,
    base: usize,
) -> Option<(Vec<LocationId>, PathCost)> {
    if candidates.len() <= base {
        return best_path(eval, anchor, candidates, start_time, false);
    }

    let (left, right) = candidates.split_at(candidates.len() / 2);
    trace!(%anchor, left = left.len(), right = right.len(), "split");

    let (first, first_cost) = solve_open(eval, anchor, left, start_time, base)?;
    let joint = first.last().copied()?;
    let (second, _) = solve_open(eval, joint, right, first_cost.time, base)?;
    merge(eval, first, first_cost, &second)
}

/// Appends the unseen stops of `second` to `first`, re-timing each move.
fn merge(
    eval: &PathEvaluator<'_>,
    mut first: Vec<LocationId>,
    mut cost: PathCost,
    second: &[LocationId],
) -> Option<(Vec<LocationId>, PathCost)> {
    let mut seen: HashSet<LocationId> = first.iter().copied().collect();
    let mut last = first.last().copied()?;

    for &stop in second {
        if !seen.insert(stop) {
            continue;
        }
        let Some(next) = eval.extend(cost, last, stop) else {
            trace!(from = %last, to = %stop, time = cost.time, "merge rejected");
            return None;
        };
        first.push(stop);
        cost = next;
        last = stop;
    }
    Some((first, cost))
}
