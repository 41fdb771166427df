//! Exact solvers for small instances.
//!
//! - [`brute_force`]: Exhaustive permutation search, O((n-1)! · n)
//! - [`dynamic_programming`]: Bitmask search over visited subsets, O(2^n · n²)
//! - [`next_permutation`] / [`Permutations`]: Iterative permutation generation

mod brute_force;
mod dynamic;
mod permutation;

pub(crate) use brute_force::best_path;
pub use brute_force::{brute_force, brute_force_subset};
pub use dynamic::{dynamic_programming, solve_snapshot, DpSolution};
pub use permutation::{next_permutation, Permutations};
