//! Time-window-aware nearest-neighbor tour construction.
//!
//! # Algorithm
//!
//! Starting at the origin at time zero, repeatedly moves to the unvisited
//! location whose edge is shortest among those reachable before their window
//! closes. Equal distances prefer the earlier raw arrival (before any
//! waiting), then the lower location id. Once every location is visited the
//! tour must close back to the origin within the origin's window.
//!
//! There is no backtracking: if at some point no unvisited location can be
//! reached in time, or the closing edge is missing or late, the heuristic
//! reports no feasible tour even when one exists.
//!
//! # Complexity
//!
//! O(n²) where n = number of locations.

use tracing::{debug, trace};

use crate::error::SolveError;
use crate::evaluation::{Leg, PathEvaluator};
use crate::models::{Graph, LocationId, PathCost, SolveOutcome, Tour};

/// Builds a tour with the time-window-aware nearest-neighbor rule.
///
/// # Examples
///
/// ```
/// use u_tsptw::models::Graph;
/// use u_tsptw::constructive::greedy;
///
/// let mut graph = Graph::new();
/// let a = graph.add_location("A", 0, 20).unwrap();
/// graph.add_location("B", 5, 10).unwrap();
/// graph.add_location("C", 12, 20).unwrap();
/// graph.connect("A", "B", 1, 1).unwrap();
/// graph.connect("B", "C", 1, 1).unwrap();
/// graph.connect("C", "A", 1, 1).unwrap();
///
/// let tour = greedy(&graph, a).unwrap().into_tour().unwrap();
/// assert_eq!(tour.names(&graph), vec!["A", "B", "C", "A"]);
/// assert_eq!(tour.time(), 13);
/// ```
pub fn greedy(graph: &Graph, start: LocationId) -> Result<SolveOutcome, SolveError> {
    if !graph.contains(start) {
        return Err(SolveError::UnknownLocation(start));
    }
    let n = graph.len();
    debug!(locations = n, "greedy construction");
    if n == 1 {
        return Ok(SolveOutcome::Feasible(Tour::single(start)));
    }

    let eval = PathEvaluator::new(graph);
    let mut visited = vec![false; n];
    visited[start.index()] = true;

    let mut stops = Vec::with_capacity(n + 1);
    stops.push(start);
    let mut current = start;
    let mut cost = PathCost::ZERO;

    for _ in 1..n {
        let mut best: Option<(LocationId, Leg)> = None;

        for edge in graph.neighbors(current) {
            if visited[edge.to.index()] {
                continue;
            }
            let Some(leg) = eval.step(current, edge.to, cost.time) else {
                continue;
            };
            if best.is_none_or(|(_, b)| (leg.distance, leg.arrival) < (b.distance, b.arrival)) {
                best = Some((edge.to, leg));
            }
        }

        let Some((next, leg)) = best else {
            debug!(at = %current, visited = stops.len(), "greedy stuck, no reachable location");
            return Ok(SolveOutcome::NoFeasibleTour);
        };
        trace!(from = %current, to = %next, time = leg.departure, "greedy step");
        visited[next.index()] = true;
        stops.push(next);
        current = next;
        cost = PathCost::new(cost.distance.saturating_add(leg.distance), leg.departure);
    }

    let Some(closed) = eval.extend(cost, current, start) else {
        debug!(at = %current, "greedy cannot return to start");
        return Ok(SolveOutcome::NoFeasibleTour);
    };
    stops.push(start);
    debug!(distance = closed.distance, time = closed.time, "greedy finished");
    Ok(SolveOutcome::Feasible(Tour::new(stops, closed)))
}
