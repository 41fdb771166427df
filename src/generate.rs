//! Random instance generation.
//!
//! Instances are built around a hidden tour that starts at location `L0`:
//! the hidden legs are always connected, and every window is widened around
//! the hidden tour's arrival time, so at least one feasible tour exists.
//! Extra random edges are then sprinkled over the remaining pairs.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::GraphError;
use crate::models::{Graph, LocationId};

/// Parameters for [`random_instance`].
///
/// # Examples
///
/// ```
/// use u_tsptw::generate::GeneratorConfig;
///
/// let config = GeneratorConfig::new(8)
///     .with_max_distance(50)
///     .with_slack(2)
///     .with_extra_edge_probability(0.25);
/// assert_eq!(config.locations, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of locations, start included. At least 1.
    pub locations: usize,
    /// Upper bound for edge distances (lower bound is 1).
    pub max_distance: i64,
    /// Upper bound for edge travel times (lower bound is 1).
    pub max_travel_time: i64,
    /// How far a window may extend on each side of the hidden arrival time.
    pub slack: i64,
    /// Chance that a pair off the hidden tour gets an edge.
    pub extra_edge_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            locations: 6,
            max_distance: 20,
            max_travel_time: 10,
            slack: 5,
            extra_edge_probability: 0.4,
        }
    }
}

impl GeneratorConfig {
    /// Default parameters for `locations` locations.
    pub fn new(locations: usize) -> Self {
        Self {
            locations: locations.max(1),
            ..Self::default()
        }
    }

    /// Sets the largest edge distance (at least 1).
    pub fn with_max_distance(mut self, d: i64) -> Self {
        self.max_distance = d.max(1);
        self
    }

    /// Sets the largest edge travel time (at least 1).
    pub fn with_max_travel_time(mut self, t: i64) -> Self {
        self.max_travel_time = t.max(1);
        self
    }

    /// Sets the window slack around hidden arrivals (at least 0).
    pub fn with_slack(mut self, slack: i64) -> Self {
        self.slack = slack.max(0);
        self
    }

    /// Sets the chance of an extra edge, clamped to `[0, 1]`.
    pub fn with_extra_edge_probability(mut self, p: f64) -> Self {
        self.extra_edge_probability = p.clamp(0.0, 1.0);
        self
    }
}

/// Builds a random graph. The start location is `L0`.
pub fn random_graph<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Graph, GraphError> {
    random_instance(config, rng).map(|(graph, _)| graph)
}

/// Builds a random graph and returns it with its hidden feasible tour.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_tsptw::evaluation::PathEvaluator;
/// use u_tsptw::generate::{random_instance, GeneratorConfig};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let (graph, hidden) = random_instance(&GeneratorConfig::new(6), &mut rng).unwrap();
/// assert_eq!(graph.len(), 6);
/// assert!(PathEvaluator::new(&graph).evaluate(&hidden).is_some());
/// ```
pub fn random_instance<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<(Graph, Vec<LocationId>), GraphError> {
    let n = config.locations.max(1);
    let max_distance = config.max_distance.max(1);
    let max_travel = config.max_travel_time.max(1);
    let slack = config.slack.max(0);
    let p = config.extra_edge_probability.clamp(0.0, 1.0);

    let mut graph = Graph::new();
    let names: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
    let mut ids = Vec::with_capacity(n);
    for name in &names {
        ids.push(graph.add_location(name, 0, 0)?);
    }

    let mut order: Vec<usize> = (1..n).collect();
    order.shuffle(rng);
    order.insert(0, 0);
    order.push(0);
    if n == 1 {
        order.truncate(1);
    }

    for leg in order.windows(2) {
        let (a, b) = (leg[0], leg[1]);
        if graph.edge(ids[a], ids[b]).is_some() {
            continue;
        }
        let distance = rng.random_range(1..=max_distance);
        let travel = rng.random_range(1..=max_travel);
        graph.connect(&names[a], &names[b], distance, travel)?;
    }

    // arrivals along the hidden tour; windows contain them, so no waiting
    let mut time: i64 = 0;
    for leg in order.windows(2) {
        let (a, b) = (leg[0], leg[1]);
        time = graph
            .travel_time(ids[a], ids[b])
            .map_or(time, |t| time.saturating_add(t));
        let latest = time.saturating_add(rng.random_range(0..=slack));
        let earliest = if b == 0 {
            0
        } else {
            (time - rng.random_range(0..=slack)).max(0)
        };
        graph.update_time_window(&names[b], earliest, latest)?;
    }
    if n == 1 {
        graph.update_time_window(&names[0], 0, slack)?;
    }

    for a in 0..n {
        for b in (a + 1)..n {
            if graph.edge(ids[a], ids[b]).is_some() || !rng.random_bool(p) {
                continue;
            }
            let distance = rng.random_range(1..=max_distance);
            let travel = rng.random_range(1..=max_travel);
            graph.connect(&names[a], &names[b], distance, travel)?;
        }
    }

    debug!(
        locations = n,
        edges = graph.edge_count(),
        "generated random instance"
    );
    let hidden = order.into_iter().map(|i| ids[i]).collect();
    Ok((graph, hidden))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::evaluation::PathEvaluator;
    use crate::exact::brute_force;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hidden_tour_is_feasible() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = GeneratorConfig::new(7);
            let (graph, hidden) = random_instance(&config, &mut rng).expect("generate");
            assert_eq!(graph.len(), 7);
            assert_eq!(hidden.len(), 8);
            assert_eq!(hidden.first(), hidden.last());
            assert!(
                PathEvaluator::new(&graph).evaluate(&hidden).is_some(),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_brute_force_finds_a_tour() {
        let mut rng = StdRng::seed_from_u64(11);
        let (graph, hidden) =
            random_instance(&GeneratorConfig::new(6), &mut rng).expect("generate");
        let outcome = brute_force(&graph, hidden[0], &SolverConfig::default()).expect("solve");
        let best = outcome.cost().expect("hidden tour exists");
        let hidden_cost = PathEvaluator::new(&graph)
            .evaluate(&hidden)
            .expect("feasible");
        assert!(best <= hidden_cost);
    }

    #[test]
    fn test_same_seed_same_graph() {
        let config = GeneratorConfig::new(5);
        let a = random_graph(&config, &mut StdRng::seed_from_u64(3)).expect("a");
        let b = random_graph(&config, &mut StdRng::seed_from_u64(3)).expect("b");
        assert_eq!(a.to_adjacency_matrix(), b.to_adjacency_matrix());
        assert_eq!(a.to_time_window_matrix(), b.to_time_window_matrix());
    }

    #[test]
    fn test_no_extra_edges() {
        let config = GeneratorConfig::new(6).with_extra_edge_probability(0.0);
        let graph = random_graph(&config, &mut StdRng::seed_from_u64(1)).expect("generate");
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn test_complete_graph() {
        let config = GeneratorConfig::new(5).with_extra_edge_probability(1.0);
        let graph = random_graph(&config, &mut StdRng::seed_from_u64(1)).expect("generate");
        assert_eq!(graph.edge_count(), 10);
    }

    #[test]
    fn test_tiny_instances() {
        let mut rng = StdRng::seed_from_u64(5);
        let (one, hidden) = random_instance(&GeneratorConfig::new(1), &mut rng).expect("one");
        assert_eq!(one.len(), 1);
        assert_eq!(hidden.len(), 1);

        let (two, hidden) = random_instance(&GeneratorConfig::new(2), &mut rng).expect("two");
        assert_eq!(two.edge_count(), 1);
        assert_eq!(hidden.len(), 3);
        assert!(PathEvaluator::new(&two).evaluate(&hidden).is_some());
    }
}
