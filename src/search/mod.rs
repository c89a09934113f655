//! Search module for the Gobang AI
//!
//! Contains:
//! - Fixed-depth minimax with alpha-beta pruning and a parallel root split
//! - A scoped placement guard that backtracks the board on drop

pub mod alphabeta;
pub mod guard;

pub use alphabeta::{SearchResult, Searcher, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
pub use guard::PlacedStone;
