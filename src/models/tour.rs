//! Tour, path cost, and solve outcome types.

use serde::{Deserialize, Serialize};

use super::{Graph, LocationId};

/// Total distance and elapsed time of a feasible visit sequence.
///
/// Ordered lexicographically: distance first, time breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathCost {
    /// Sum of edge distances.
    pub distance: i64,
    /// Clock value after the last stop, waiting included.
    pub time: i64,
}

impl PathCost {
    /// The cost of a sequence that has not moved yet.
    pub const ZERO: Self = Self {
        distance: 0,
        time: 0,
    };

    /// Creates a new cost pair.
    pub fn new(distance: i64, time: i64) -> Self {
        Self { distance, time }
    }
}

/// A closed visit sequence with its evaluated cost.
///
/// The first and last stop are the start location, except for the trivial
/// single-stop tour of a one-location instance.
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
/// graph.add_location("B", 0, 20).unwrap();
/// graph.connect("A", "B", 2, 1).unwrap();
///
/// let outcome = brute_force(&graph, a, &SolverConfig::default()).unwrap();
/// let tour = outcome.tour().unwrap();
/// assert_eq!(tour.names(&graph), vec!["A", "B", "A"]);
/// assert_eq!(tour.distance(), 4);
/// assert!(tour.is_closed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    stops: Vec<LocationId>,
    cost: PathCost,
}

impl Tour {
    pub(crate) fn new(stops: Vec<LocationId>, cost: PathCost) -> Self {
        Self { stops, cost }
    }

    /// The tour of an instance whose only location is the start.
    pub(crate) fn single(start: LocationId) -> Self {
        Self::new(vec![start], PathCost::ZERO)
    }

    /// Stops in visit order, start repeated at the end.
    pub fn stops(&self) -> &[LocationId] {
        &self.stops
    }

    /// Number of stops, counting the closing return.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the tour has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Distance and time together.
    pub fn cost(&self) -> PathCost {
        self.cost
    }

    /// Total travelled distance.
    pub fn distance(&self) -> i64 {
        self.cost.distance
    }

    /// Total elapsed time, waiting included.
    pub fn time(&self) -> i64 {
        self.cost.time
    }

    /// Returns `true` if the tour ends where it started.
    pub fn is_closed(&self) -> bool {
        self.stops.first() == self.stops.last()
    }

    /// Stop names in visit order.
    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        graph.names_of(&self.stops)
    }
}

/// Result of a solver call: a fully valid tour or an explicit "none exists".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// A tour satisfying every time window.
    Feasible(Tour),
    /// The strategy found no tour satisfying every time window.
    NoFeasibleTour,
}

impl SolveOutcome {
    /// Returns `true` for [`SolveOutcome::Feasible`].
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// The tour, if one was found.
    pub fn tour(&self) -> Option<&Tour> {
        match self {
            Self::Feasible(tour) => Some(tour),
            Self::NoFeasibleTour => None,
        }
    }

    /// Consumes the outcome, returning the tour if one was found.
    pub fn into_tour(self) -> Option<Tour> {
        match self {
            Self::Feasible(tour) => Some(tour),
            Self::NoFeasibleTour => None,
        }
    }

    /// Cost of the tour, if one was found.
    pub fn cost(&self) -> Option<PathCost> {
        self.tour().map(Tour::cost)
    }
}

impl From<Option<Tour>> for SolveOutcome {
    fn from(tour: Option<Tour>) -> Self {
        tour.map_or(Self::NoFeasibleTour, Self::Feasible)
    }
}
