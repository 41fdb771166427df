//! Path evaluator that computes distance, elapsed time, and feasibility.

use crate::models::{Graph, LocationId, PathCost};

/// One travelled edge, timed against the destination's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    /// Edge distance.
    pub distance: i64,
    /// Raw arrival time at the destination.
    pub arrival: i64,
    /// Time the traveller leaves the destination, after waiting if early.
    pub departure: i64,
}

impl Leg {
    /// Time spent waiting for the destination's window to open.
    pub fn waiting(&self) -> i64 {
        self.departure - self.arrival
    }
}

/// Evaluates visit sequences against a graph's edges and time windows.
///
/// Walking a path, each leg arrives at `time + travel_time`. Arriving after
/// the destination's `latest` makes the whole path infeasible. Arriving before
/// its `earliest` waits until `earliest`, which costs time but no distance.
/// A missing edge is infeasible as well.
///
/// # Examples
///
/// ```
/// use u_tsptw::models::{Graph, PathCost};
/// use u_tsptw::evaluation::PathEvaluator;
///
/// let mut graph = Graph::new();
/// let a = graph.add_location("A", 0, 20).unwrap();
/// let b = graph.add_location("B", 10, 15).unwrap();
/// graph.connect("A", "B", 4, 3).unwrap();
///
/// let eval = PathEvaluator::new(&graph);
/// // arrives at 3, waits until 10
/// assert_eq!(eval.evaluate(&[a, b]), Some(PathCost::new(4, 10)));
/// assert_eq!(eval.evaluate(&[a, b, a]), Some(PathCost::new(8, 13)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathEvaluator<'a> {
    graph: &'a Graph,
}

impl<'a> PathEvaluator<'a> {
    /// Creates a new evaluator over the given graph.
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// The graph being evaluated against.
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// Times a single move from `from` (left at `time`) to `to`.
    ///
    /// Returns `None` if the edge is missing or `to`'s window has closed.
    pub fn step(&self, from: LocationId, to: LocationId, time: i64) -> Option<Leg> {
        let edge = self.graph.edge(from, to)?;
        let window = self.graph.time_window(to)?;
        let arrival = time.saturating_add(edge.travel_time);
        let departure = window.departure(arrival)?;
        Some(Leg {
            distance: edge.distance,
            arrival,
            departure,
        })
    }

    /// Extends an evaluated prefix ending at `from` by one move to `to`.
    pub fn extend(&self, cost: PathCost, from: LocationId, to: LocationId) -> Option<PathCost> {
        let leg = self.step(from, to, cost.time)?;
        Some(PathCost::new(cost.distance.saturating_add(leg.distance), leg.departure))
    }

    /// Evaluates a path starting at time zero.
    ///
    /// Returns `(total distance, final time)` or `None` if infeasible.
    pub fn evaluate(&self, path: &[LocationId]) -> Option<PathCost> {
        self.evaluate_from(path, 0)
    }

    /// Evaluates a path whose first stop is left at `start_time`.
    pub fn evaluate_from(&self, path: &[LocationId], start_time: i64) -> Option<PathCost> {
        path.windows(2)
            .try_fold(PathCost::new(0, start_time), |cost, pair| {
                self.extend(cost, pair[0], pair[1])
            })
    }

    /// Sums distance and raw travel time along a path, ignoring windows.
    ///
    /// Returns `None` if any consecutive pair is not connected.
    pub fn measure(&self, path: &[LocationId]) -> Option<PathCost> {
        path.windows(2).try_fold(PathCost::ZERO, |acc, pair| {
            let edge = self.graph.edge(pair[0], pair[1])?;
            Some(PathCost::new(
                acc.distance.saturating_add(edge.distance),
                acc.time.saturating_add(edge.travel_time),
            ))
        })
    }
}
