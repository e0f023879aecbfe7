//! Termination rules.
//!
//! The turn engine consults the [`WinEvaluator`] after every bankruptcy and
//! around every turn advance. The evaluator only reads the registry and the
//! round counter; it never changes state.

pub mod evaluator;

pub use evaluator::{EndReason, GameResult, WinEvaluator};
