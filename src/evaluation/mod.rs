//! Feasibility checking and cost evaluation of visit sequences.

mod evaluator;

pub use evaluator::{Leg, PathEvaluator};
