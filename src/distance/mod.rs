//! Dense matrix exports of a graph.
//!
//! Provides the integer matrix type, the unreachable sentinel, and the
//! snapshot bundle consumed by the bitmask search.

mod matrix;

pub use matrix::{GraphSnapshot, Matrix, UNREACHABLE};
