//! Cross-validation of the four strategies.
//!
//! # Invariants tested
//!
//! - **Valid tours:** a returned tour starts and ends at the start, visits
//!   every other location once, and re-evaluates to its reported cost.
//! - **Exact lower bound:** no strategy beats brute force.
//! - **Exact agreement:** without binding deadlines the bitmask search finds
//!   the brute force distance, and no heuristic beats it.
//! - **Infeasibility:** when brute force finds nothing, nobody does.
//! - **Determinism:** solving twice gives the same outcome.
//! - **Generated instances:** the hidden tour bounds the optimum.

use std::collections::HashSet;

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_tsptw::decomposition::divide_and_conquer;
use u_tsptw::evaluation::PathEvaluator;
use u_tsptw::generate::{random_instance, GeneratorConfig};
use u_tsptw::models::{Graph, LocationId, PathCost, SolveOutcome, Tour};
use u_tsptw::{solve, SolverConfig, Strategy as Method};

type Window = (i64, i64);
type EdgeValues = Option<(i64, i64)>;

/// Small graphs with arbitrary windows and a random subset of edges.
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1usize..=6)
        .prop_flat_map(|n| {
            let pairs = n * (n - 1) / 2;
            (
                vec((0i64..15, 0i64..25), n),
                vec(option::weighted(0.7, (1i64..10, 1i64..8)), pairs),
            )
        })
        .prop_map(|(windows, edges)| build_graph(&windows, &edges))
}

/// `windows` holds `(earliest, span)`; `edges` one entry per pair `a < b`.
fn build_graph(windows: &[Window], edges: &[EdgeValues]) -> Graph {
    let mut graph = Graph::new();
    for (i, &(earliest, span)) in windows.iter().enumerate() {
        graph
            .add_location(&format!("L{i}"), earliest, earliest + span)
            .expect("valid window");
    }
    let n = windows.len();
    let mut k = 0;
    for a in 0..n {
        for b in (a + 1)..n {
            if let Some((d, t)) = edges[k] {
                graph
                    .connect(&format!("L{a}"), &format!("L{b}"), d, t)
                    .expect("fresh edge");
            }
            k += 1;
        }
    }
    graph
}

/// Windows open at `earliest` and stay open far beyond any tour length.
fn no_deadline_graph(earliest: &[i64], edges: &[EdgeValues]) -> Graph {
    let windows: Vec<Window> = earliest.iter().map(|&e| (e, 10_000)).collect();
    let pairs = windows.len() * (windows.len() - 1) / 2;
    build_graph(&windows, &edges[..pairs])
}

fn start_of(graph: &Graph) -> LocationId {
    graph.ids().next().expect("non-empty graph")
}

fn check_tour(graph: &Graph, start: LocationId, tour: &Tour) -> Result<(), TestCaseError> {
    let stops = tour.stops();
    prop_assert_eq!(stops.first(), Some(&start));
    prop_assert_eq!(stops.last(), Some(&start));

    let expected_len = if graph.len() == 1 { 1 } else { graph.len() + 1 };
    prop_assert_eq!(stops.len(), expected_len);

    let inner: HashSet<LocationId> = stops.iter().copied().skip(1).filter(|&s| s != start).collect();
    prop_assert_eq!(inner.len(), graph.len() - 1, "every location exactly once");

    prop_assert_eq!(PathEvaluator::new(graph).evaluate(stops), Some(tour.cost()));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn returned_tours_are_valid(graph in graph_strategy()) {
        let start = start_of(&graph);
        let config = SolverConfig::default();
        for strategy in Method::ALL {
            let outcome = solve(&graph, start, strategy, &config).expect("solve");
            if let Some(tour) = outcome.tour() {
                check_tour(&graph, start, tour)?;
            }
        }
    }

    #[test]
    fn nothing_beats_brute_force(graph in graph_strategy()) {
        let start = start_of(&graph);
        let config = SolverConfig::default();
        let exact = solve(&graph, start, Method::BruteForce, &config).expect("bf");

        for strategy in [Method::DynamicProgramming, Method::Greedy, Method::DivideAndConquer] {
            let outcome = solve(&graph, start, strategy, &config).expect("solve");
            match (exact.cost(), outcome.cost()) {
                (Some(best), Some(found)) => prop_assert!(best <= found, "{} beat brute force", strategy),
                (None, Some(_)) => prop_assert!(false, "{} found a tour brute force missed", strategy),
                _ => {}
            }
        }
    }

    #[test]
    fn dp_matches_brute_force_without_deadlines(
        earliest in vec(0i64..15, 1..=6),
        edges in vec(option::weighted(0.8, (1i64..10, 1i64..8)), 15),
    ) {
        let graph = no_deadline_graph(&earliest, &edges);
        let start = start_of(&graph);
        let config = SolverConfig::default();

        let exact = solve(&graph, start, Method::BruteForce, &config).expect("bf");
        let dp = solve(&graph, start, Method::DynamicProgramming, &config).expect("dp");
        prop_assert_eq!(
            exact.cost().map(|c| c.distance),
            dp.cost().map(|c| c.distance)
        );
    }

    /// Deadlines are out of reach, so the bitmask search is distance-optimal.
    /// Only distances are compared: among equal-distance paths the table keeps
    /// the first one found, not the earliest.
    #[test]
    fn heuristics_never_beat_dp_without_deadlines(
        earliest in vec(0i64..15, 1..=6),
        edges in vec(option::weighted(0.8, (1i64..10, 1i64..8)), 15),
    ) {
        let graph = no_deadline_graph(&earliest, &edges);
        let start = start_of(&graph);
        let config = SolverConfig::default();
        let dp = solve(&graph, start, Method::DynamicProgramming, &config).expect("dp");

        for strategy in [Method::Greedy, Method::DivideAndConquer] {
            let outcome = solve(&graph, start, strategy, &config).expect("solve");
            match (dp.cost(), outcome.cost()) {
                (Some(best), Some(found)) => prop_assert!(
                    best.distance <= found.distance,
                    "{} beat dynamic programming", strategy
                ),
                (None, Some(_)) => prop_assert!(false, "{} found a tour dynamic programming missed", strategy),
                _ => {}
            }
        }
    }

    #[test]
    fn solving_is_deterministic(graph in graph_strategy()) {
        let start = start_of(&graph);
        let config = SolverConfig::default();
        for strategy in Method::ALL {
            let first = solve(&graph, start, strategy, &config).expect("first");
            let second = solve(&graph, start, strategy, &config).expect("second");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn whole_base_case_matches_brute_force(graph in graph_strategy()) {
        let start = start_of(&graph);
        let config = SolverConfig::default().with_divide_base_case(graph.len());
        prop_assert_eq!(
            divide_and_conquer(&graph, start, &config).expect("dc"),
            solve(&graph, start, Method::BruteForce, &config).expect("bf")
        );
    }

    #[test]
    fn generated_instances_are_feasible(seed in any::<u64>(), n in 1usize..=7) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (graph, hidden) = random_instance(&GeneratorConfig::new(n), &mut rng).expect("generate");
        let start = hidden[0];
        let hidden_cost = PathEvaluator::new(&graph).evaluate(&hidden);
        prop_assert!(hidden_cost.is_some());

        let exact = solve(&graph, start, Method::BruteForce, &SolverConfig::default()).expect("bf");
        let best = exact.cost();
        prop_assert!(best.is_some());
        prop_assert!(best <= hidden_cost);
    }
}

// ---- fixed scenarios ----

fn four_city() -> Graph {
    let mut g = Graph::new();
    g.add_location("A", 0, 20).expect("A");
    g.add_location("B", 2, 15).expect("B");
    g.add_location("C", 5, 20).expect("C");
    g.add_location("D", 10, 25).expect("D");
    g.connect("A", "B", 5, 3).expect("A-B");
    g.connect("A", "C", 10, 6).expect("A-C");
    g.connect("B", "C", 4, 2).expect("B-C");
    g.connect("B", "D", 8, 5).expect("B-D");
    g.connect("C", "D", 6, 4).expect("C-D");
    g
}

#[test]
fn four_city_exact_strategies_agree() {
    let g = four_city();
    let a = g.id_of("A").expect("A");
    let config = SolverConfig::default();

    for strategy in [Method::BruteForce, Method::DynamicProgramming, Method::DivideAndConquer] {
        let tour = solve(&g, a, strategy, &config)
            .expect("solve")
            .into_tour()
            .unwrap_or_else(|| panic!("{strategy} found no tour"));
        assert_eq!(tour.names(&g), vec!["A", "C", "D", "B", "A"], "{strategy}");
        assert_eq!(tour.cost(), PathCost::new(29, 18), "{strategy}");
    }

    // greedy walks A-B-C-D and has no edge home
    assert_eq!(
        solve(&g, a, Method::Greedy, &config).expect("greedy"),
        SolveOutcome::NoFeasibleTour
    );
}

#[test]
fn late_window_defeats_every_strategy() {
    let mut g = Graph::new();
    let a = g.add_location("A", 0, 20).expect("A");
    g.add_location("B", 0, 2).expect("B");
    g.connect("A", "B", 1, 5).expect("A-B");
    for strategy in Method::ALL {
        assert_eq!(
            solve(&g, a, strategy, &SolverConfig::default()).expect("solve"),
            SolveOutcome::NoFeasibleTour,
            "{strategy}"
        );
    }
}

#[test]
fn edits_change_the_answer() {
    let mut g = four_city();
    let a = g.id_of("A").expect("A");
    let config = SolverConfig::default();

    // a direct A-D edge opens A-B-C-D-A at distance 20
    g.connect("A", "D", 5, 3).expect("A-D");
    let tour = solve(&g, a, Method::BruteForce, &config)
        .expect("bf")
        .into_tour()
        .expect("feasible");
    assert_eq!(tour.distance(), 20);

    g.update_time_window("D", 30, 40).expect("window");
    let outcome = solve(&g, a, Method::DynamicProgramming, &config).expect("dp");
    // D now opens after A closes
    assert_eq!(outcome, SolveOutcome::NoFeasibleTour);
}

#[test]
fn outcome_serializes() {
    let g = four_city();
    let a = g.id_of("A").expect("A");
    let outcome = solve(&g, a, Method::BruteForce, &SolverConfig::default()).expect("bf");
    let json = serde_json::to_string(&outcome).expect("serialize");
    let back: SolveOutcome = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, outcome);

    let strategy: Method =
        serde_json::from_str(&serde_json::to_string(&Method::Greedy).expect("serialize"))
            .expect("deserialize");
    assert_eq!(strategy, Method::Greedy);
}
