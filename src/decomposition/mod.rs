//! Decomposition heuristics that solve sub-problems and stitch them together.
//!
//! - [`divide_and_conquer`]: Midpoint halving with exact base cases and merge

mod divide_conquer;

pub use divide_conquer::{divide_and_conquer, divide_and_conquer_subset};
