//! Uniform entry point over the four strategies.

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::constructive::greedy;
use crate::decomposition::divide_and_conquer;
use crate::error::SolveError;
use crate::exact::{brute_force, dynamic_programming};
use crate::models::{Graph, LocationId, SolveOutcome};

/// A tour-solving strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Exhaustive permutation search. Exact; practical to about 11 locations.
    BruteForce,
    /// Time-window-aware nearest neighbor. Fast; may miss feasible tours.
    Greedy,
    /// Midpoint halving with exact base cases. May miss feasible tours.
    DivideAndConquer,
    /// Bitmask search over subsets. Practical to about 20 locations.
    DynamicProgramming,
}

impl Strategy {
    /// Every strategy, exact ones first.
    pub const ALL: [Self; 4] = [
        Self::BruteForce,
        Self::DynamicProgramming,
        Self::Greedy,
        Self::DivideAndConquer,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BruteForce => "brute force",
            Self::Greedy => "greedy",
            Self::DivideAndConquer => "divide and conquer",
            Self::DynamicProgramming => "dynamic programming",
        }
    }

    /// Returns `true` for strategies that always search the whole space.
    pub fn is_exhaustive(self) -> bool {
        matches!(self, Self::BruteForce | Self::DynamicProgramming)
    }

    /// Runs this strategy. See [`solve`].
    pub fn solve(
        self,
        graph: &Graph,
        start: LocationId,
        config: &SolverConfig,
    ) -> Result<SolveOutcome, SolveError> {
        match self {
            Self::BruteForce => brute_force(graph, start, config),
            Self::Greedy => greedy(graph, start),
            Self::DivideAndConquer => divide_and_conquer(graph, start, config),
            Self::DynamicProgramming => dynamic_programming(graph, start, config),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Solves the instance from `start` with the chosen strategy.
///
/// Solvers only read the graph. A returned tour always satisfies every
/// window; when none is found the outcome is
/// [`SolveOutcome::NoFeasibleTour`]. Errors are reserved for an unknown start
/// or an instance above an exact strategy's ceiling.
///
/// # Examples
///
/// ```
/// use u_tsptw::models::Graph;
/// use u_tsptw::{solve, SolverConfig, Strategy};
///
/// let mut graph = Graph::new();
/// let a = graph.add_location("A", 0, 20).unwrap();
/// graph.add_location("B", 5, 10).unwrap();
/// graph.add_location("C", 12, 20).unwrap();
/// graph.connect("A", "B", 1, 1).unwrap();
/// graph.connect("B", "C", 1, 1).unwrap();
/// graph.connect("C", "A", 1, 1).unwrap();
///
/// for strategy in Strategy::ALL {
///     let outcome = solve(&graph, a, strategy, &SolverConfig::default()).unwrap();
///     assert_eq!(outcome.tour().unwrap().distance(), 3);
/// }
/// ```
pub fn solve(
    graph: &Graph,
    start: LocationId,
    strategy: Strategy,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    strategy.solve(graph, start, config)
}

/// Locations a solver must visit besides `start`, in caller order.
///
/// `None` selects every location in id order. The start and repeated ids
/// are dropped.
pub(crate) fn scope(
    graph: &Graph,
    start: LocationId,
    subset: Option<&[LocationId]>,
) -> Result<Vec<LocationId>, SolveError> {
    if !graph.contains(start) {
        return Err(SolveError::UnknownLocation(start));
    }
    let Some(subset) = subset else {
        return Ok(graph.ids().filter(|&id| id != start).collect());
    };

    let mut seen = vec![false; graph.len()];
    seen[start.index()] = true;
    let mut out = Vec::with_capacity(subset.len());
    for &id in subset {
        if !graph.contains(id) {
            return Err(SolveError::UnknownLocation(id));
        }
        if !seen[id.index()] {
            seen[id.index()] = true;
            out.push(id);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_cycle() -> (Graph, LocationId) {
        let mut g = Graph::new();
        let a = g.add_location("A", 0, 20).expect("A");
        g.add_location("B", 5, 10).expect("B");
        g.add_location("C", 12, 20).expect("C");
        g.connect("A", "B", 1, 1).expect("A-B");
        g.connect("B", "C", 1, 1).expect("B-C");
        g.connect("C", "A", 1, 1).expect("C-A");
        (g, a)
    }

    #[test]
    fn test_every_strategy_finds_the_cycle() {
        let (g, a) = three_cycle();
        for strategy in Strategy::ALL {
            let tour = solve(&g, a, strategy, &SolverConfig::default())
                .expect("solve")
                .into_tour()
                .unwrap_or_else(|| panic!("{strategy} found no tour"));
            assert_eq!(tour.names(&g), vec!["A", "B", "C", "A"], "{strategy}");
            assert_eq!(tour.distance(), 3, "{strategy}");
        }
    }

    #[test]
    fn test_idempotent() {
        let (g, a) = three_cycle();
        let config = SolverConfig::default();
        for strategy in Strategy::ALL {
            let first = strategy.solve(&g, a, &config).expect("first");
            let second = strategy.solve(&g, a, &config).expect("second");
            assert_eq!(first, second, "{strategy}");
        }
    }

    #[test]
    fn test_unreachable_location_defeats_every_strategy() {
        let mut g = Graph::new();
        let a = g.add_location("A", 0, 20).expect("A");
        g.add_location("B", 0, 10).expect("B");
        g.add_location("C", 0, 2).expect("C");
        g.connect("A", "B", 1, 1).expect("A-B");
        g.connect("B", "C", 1, 4).expect("B-C");
        g.connect("C", "A", 1, 1).expect("C-A");
        // C closes at 2; the direct edge now arrives at 3, the detour at 5
        g.update_edge("A", "C", 1, 3).expect("slow A-C");
        for strategy in Strategy::ALL {
            let outcome = solve(&g, a, strategy, &SolverConfig::default()).expect("solve");
            assert_eq!(outcome, SolveOutcome::NoFeasibleTour, "{strategy}");
        }
    }

    #[test]
    fn test_unknown_start_is_an_error() {
        let (g, _) = three_cycle();
        for strategy in Strategy::ALL {
            assert_eq!(
                solve(&g, LocationId(5), strategy, &SolverConfig::default()),
                Err(SolveError::UnknownLocation(LocationId(5)))
            );
        }
    }

    #[test]
    fn test_scope() {
        let (g, a) = three_cycle();
        let (b, c) = (LocationId(1), LocationId(2));
        assert_eq!(scope(&g, a, None), Ok(vec![b, c]));
        assert_eq!(scope(&g, a, Some(&[c, a, c, b])), Ok(vec![c, b]));
        assert_eq!(
            scope(&g, a, Some(&[LocationId(9)])),
            Err(SolveError::UnknownLocation(LocationId(9)))
        );
    }

    #[test]
    fn test_strategy_metadata() {
        assert!(Strategy::BruteForce.is_exhaustive());
        assert!(Strategy::DynamicProgramming.is_exhaustive());
        assert!(!Strategy::Greedy.is_exhaustive());
        assert_eq!(Strategy::DivideAndConquer.to_string(), "divide and conquer");
    }
}
