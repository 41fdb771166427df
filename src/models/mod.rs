//! Domain model types for time-windowed tours.
//!
//! Provides locations with visiting windows, the symmetric graph that owns
//! them, and the tour and outcome values produced by solvers.

mod graph;
mod location;
mod tour;

pub use graph::{Edge, Graph};
pub use location::{Location, LocationId, TimeWindow};
pub use tour::{PathCost, SolveOutcome, Tour};
