//! Game rules for Gobang
//!
//! Standard free-style five-in-a-row: five or more stones of one color in a
//! horizontal, vertical or diagonal line win. No captures, no forbidden moves.

pub mod win;

// Re-exports for convenient access
pub use win::{find_five_line, five_line_through, has_five, has_five_through, run_through};
