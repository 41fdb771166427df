//! Error types for graph construction and solver invocation.
//!
//! Infeasibility is not an error: solvers report it through
//! [`SolveOutcome::NoFeasibleTour`](crate::models::SolveOutcome::NoFeasibleTour).

use thiserror::Error;

use crate::models::LocationId;

/// A rejected graph mutation. The graph is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A location with this name already exists.
    #[error("location `{0}` already exists")]
    DuplicateKey(String),

    /// The time window has `earliest > latest`.
    #[error("time window [{earliest}, {latest}] has earliest after latest")]
    InvalidRange {
        /// Requested earliest time.
        earliest: i64,
        /// Requested latest time.
        latest: i64,
    },

    /// An edge would connect a location to itself.
    #[error("location `{0}` cannot be connected to itself")]
    SelfLoop(String),

    /// An edge between the two locations already exists.
    #[error("locations `{from}` and `{to}` are already connected")]
    DuplicateEdge {
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
    },

    /// Distance or travel time is negative, or equals the unreachable sentinel.
    #[error("distance {distance} and travel time {travel_time} must be non-negative and below i64::MAX")]
    InvalidValue {
        /// Requested distance.
        distance: i64,
        /// Requested travel time.
        travel_time: i64,
    },

    /// No location has this name.
    #[error("unknown location `{0}`")]
    UnknownLocation(String),

    /// The two locations are not connected.
    #[error("no edge between `{from}` and `{to}`")]
    MissingEdge {
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
    },
}

/// A solver call the engine cannot run as requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The start or a subset member is not a location of the graph.
    #[error("location {0} is not part of the graph")]
    UnknownLocation(LocationId),

    /// The instance exceeds the size ceiling of an exponential strategy.
    #[error("{strategy} handles at most {limit} locations, got {count}")]
    TooManyLocations {
        /// Name of the refusing strategy.
        strategy: &'static str,
        /// Locations in scope, start included.
        count: usize,
        /// Configured ceiling.
        limit: usize,
    },
}
