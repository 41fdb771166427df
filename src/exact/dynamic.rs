//! Bitmask dynamic program over visited subsets.
//!
//! # Algorithm
//!
//! State `(mask, i)` is the cheapest way found to leave the start, visit
//! exactly the locations in `mask`, and stand at `i`. Each state stores its
//! cost, the departure time from `i` (waiting included), and its predecessor.
//!
//! From every reachable state, moving to an unvisited `j` arrives at
//! `departure + travel(i, j)`; the move is kept only if that arrival is within
//! `j`'s window, and the target state is relaxed only when the cost strictly
//! improves. Equal costs do not replace the stored time, so the table keeps
//! the first path found at a given cost.
//!
//! After all subsets are filled, each full state is closed back to the start
//! (same window check and wait rule as the evaluator); the answer is the
//! smallest `(distance, time)` among them, and the tour is rebuilt from the
//! predecessor links.
//!
//! # Complexity
//!
//! O(2^n · n²) time, O(2^n · n) memory. Bounded by
//! [`SolverConfig::max_dp_locations`].

use tracing::debug;

use crate::config::SolverConfig;
use crate::distance::GraphSnapshot;
use crate::error::SolveError;
use crate::models::{Graph, LocationId, PathCost, SolveOutcome, Tour};

const NO_PARENT: u8 = u8::MAX;

/// Optimal tour found by [`solve_snapshot`], in snapshot indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpSolution {
    /// Snapshot indices in visit order, start repeated at the end.
    pub order: Vec<usize>,
    /// Distance and time of the tour.
    pub cost: PathCost,
}

/// Finds the optimal tour over every location of the graph with the bitmask
/// search.
///
/// # Examples
///
/// ```
/// use u_tsptw::models::Graph;
/// use u_tsptw::exact::dynamic_programming;
/// use u_tsptw::SolverConfig;
///
/// let mut graph = Graph::new();
/// let a = graph.add_location("A", 0, 20).unwrap();
/// graph.add_location("B", 2, 15).unwrap();
/// graph.add_location("C", 5, 20).unwrap();
/// graph.add_location("D", 10, 25).unwrap();
/// graph.connect("A", "B", 5, 3).unwrap();
/// graph.connect("A", "C", 10, 6).unwrap();
/// graph.connect("B", "C", 4, 2).unwrap();
/// graph.connect("B", "D", 8, 5).unwrap();
/// graph.connect("C", "D", 6, 4).unwrap();
///
/// let outcome = dynamic_programming(&graph, a, &SolverConfig::default()).unwrap();
/// assert_eq!(outcome.tour().unwrap().distance(), 29);
/// ```
pub fn dynamic_programming(
    graph: &Graph,
    start: LocationId,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    if !graph.contains(start) {
        return Err(SolveError::UnknownLocation(start));
    }
    config.check_dp(graph.len())?;
    if graph.len() == 1 {
        return Ok(SolveOutcome::Feasible(Tour::single(start)));
    }

    let snapshot = graph.snapshot();
    let outcome = solve_snapshot(&snapshot, start.index(), config)?
        .map(|sol| {
            let stops = sol.order.into_iter().map(LocationId).collect();
            Tour::new(stops, sol.cost)
        })
        .into();
    Ok(outcome)
}

/// Runs the bitmask search directly on exported matrices.
///
/// `start` is a snapshot index. Returns `Ok(None)` when no tour satisfies the
/// windows.
pub fn solve_snapshot(
    snapshot: &GraphSnapshot,
    start: usize,
    config: &SolverConfig,
) -> Result<Option<DpSolution>, SolveError> {
    let n = snapshot.size();
    if start >= n {
        return Err(SolveError::UnknownLocation(LocationId(start)));
    }
    config.check_dp(n)?;
    if n == 1 {
        return Ok(Some(DpSolution {
            order: vec![start],
            cost: PathCost::ZERO,
        }));
    }

    debug!(locations = n, states = (1usize << n) * n, "bitmask search");
    let table = DpTable::build(snapshot, start);
    let solution = table.close(snapshot);
    debug!(cost = ?solution.as_ref().map(|s| s.cost), "bitmask search finished");
    Ok(solution)
}

/// Filled state table of one search.
struct DpTable {
    n: usize,
    start: usize,
    cost: Vec<i64>,
    departure: Vec<i64>,
    parent: Vec<u8>,
}

impl DpTable {
    fn build(snapshot: &GraphSnapshot, start: usize) -> Self {
        let n = snapshot.size();
        let states = (1usize << n) * n;
        let mut table = Self {
            n,
            start,
            cost: vec![i64::MAX; states],
            departure: vec![i64::MAX; states],
            parent: vec![NO_PARENT; states],
        };

        let start_bit = 1usize << start;
        let origin = table.slot(start_bit, start);
        table.cost[origin] = 0;
        table.departure[origin] = 0;

        let full = (1usize << n) - 1;
        for mask in 1..=full {
            if mask & start_bit == 0 {
                continue;
            }
            for i in 0..n {
                if mask & (1 << i) == 0 {
                    continue;
                }
                let here = table.slot(mask, i);
                if !table.reached(here) {
                    continue;
                }
                let cost = table.cost[here];
                let time = table.departure[here];

                for j in 0..n {
                    if mask & (1 << j) != 0 {
                        continue;
                    }
                    let Some((distance, travel)) = snapshot.edge(i, j) else {
                        continue;
                    };
                    let Some(departure) = snapshot.window(j).departure(time.saturating_add(travel))
                    else {
                        continue;
                    };

                    let next = table.slot(mask | (1 << j), j);
                    let candidate = cost.saturating_add(distance);
                    if !table.reached(next) || candidate < table.cost[next] {
                        table.cost[next] = candidate;
                        table.departure[next] = departure;
                        table.parent[next] = i as u8;
                    }
                }
            }
        }
        table
    }

    fn slot(&self, mask: usize, last: usize) -> usize {
        mask * self.n + last
    }

    /// Only the origin is reached without a predecessor.
    fn reached(&self, slot: usize) -> bool {
        self.parent[slot] != NO_PARENT || slot == self.slot(1 << self.start, self.start)
    }

    /// Cost and departure time stored for `(mask, last)`, if reachable.
    fn state(&self, mask: usize, last: usize) -> Option<PathCost> {
        let slot = self.slot(mask, last);
        self.reached(slot)
            .then(|| PathCost::new(self.cost[slot], self.departure[slot]))
    }

    fn close(&self, snapshot: &GraphSnapshot) -> Option<DpSolution> {
        let full = (1usize << self.n) - 1;
        let home = snapshot.window(self.start);

        let mut best: Option<(PathCost, usize)> = None;
        for i in (0..self.n).filter(|&i| i != self.start) {
            let Some(state) = self.state(full, i) else {
                continue;
            };
            let Some((distance, travel)) = snapshot.edge(i, self.start) else {
                continue;
            };
            let Some(time) = home.departure(state.time.saturating_add(travel)) else {
                continue;
            };
            let total = PathCost::new(state.distance.saturating_add(distance), time);
            if best.is_none_or(|(b, _)| total < b) {
                best = Some((total, i));
            }
        }

        let (cost, last) = best?;
        Some(DpSolution {
            order: self.rebuild(full, last),
            cost,
        })
    }

    fn rebuild(&self, full: usize, last: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.n + 1);
        order.push(self.start);
        let mut mask = full;
        let mut current = last;
        while current != self.start {
            order.push(current);
            let prev = self.parent[self.slot(mask, current)];
            mask &= !(1 << current);
            current = usize::from(prev);
        }
        order.push(self.start);
        order.reverse();
        order
    }
}
