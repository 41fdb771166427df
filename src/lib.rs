//! # u-tsptw
//!
//! Traveling salesman with time windows: a location graph, a feasibility
//! evaluator, and four interchangeable tour solvers.
//!
//! ## Modules
//!
//! - [`models`]: Graph, locations, time windows, tours
//! - [`distance`]: Dense distance, travel time and window matrices
//! - [`evaluation`]: Path feasibility checking and cost evaluation
//! - [`exact`]: Brute force permutation search and bitmask dynamic program
//! - [`constructive`]: Time-window-aware nearest neighbor
//! - [`decomposition`]: Divide & conquer with exact base cases
//! - [`solver`]: Strategy selection over all of the above
//! - [`generate`]: Random instances with a known feasible tour
//!
//! ## Time model
//!
//! Every tour leaves its start at time 0. Arriving before a window opens
//! waits until it opens; arriving after it closes is infeasible. A tour's
//! time is its arrival back at the start. Costs compare by distance first,
//! then by time.

pub mod config;
pub mod constructive;
pub mod decomposition;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod generate;
pub mod models;
pub mod solver;

pub use config::SolverConfig;
pub use error::{GraphError, SolveError};
pub use solver::{solve, Strategy};
