//! Constructive heuristics for building tours without search.
//!
//! - [`greedy`]: Time-window-aware nearest-neighbor, O(n²)

mod greedy;

pub use greedy::greedy;
