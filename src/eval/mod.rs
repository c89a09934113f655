//! Evaluation module for Gobang positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Line patterns (singles, twos, threes, fours, fives)
//! - Whether each end of a line is open or blocked
//! - Neighbourhood counts for move ordering

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, evaluate_parallel, score_move};
pub use patterns::{score_run, PatternScore};
