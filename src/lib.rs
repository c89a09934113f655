//! Gobang (five in a row) engine
//!
//! A 15x15 Gobang engine:
//! - Bit-packed board store with a plain grid mirror
//! - Five or more in a row wins, in any of the four directions
//! - Fixed-depth minimax with alpha-beta pruning, three difficulty tiers
//! - Root moves split across a rayon pool when there are enough of them
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Five-in-a-row detection
//! - [`eval`]: Position evaluation and move-ordering heuristics
//! - [`search`]: Alpha-beta search and its backtracking guard
//! - [`engine`]: Main AI engine, difficulty to depth mapping
//! - [`config`]: `Gobang.toml` loading
//! - [`game`]: Headless game session with a background AI player
//!
//! # Quick Start
//!
//! ```
//! use gobang::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new();
//! let engine = AIEngine::new();
//!
//! board.place(Pos::CENTER, Stone::Black);
//!
//! // AI responds as White
//! if let Some(pos) = engine.best_move(&board, Stone::White, Stone::Black, Difficulty::Easy) {
//!     board.place(pos, Stone::White);
//!     println!("AI plays at {}", pos);
//! }
//! assert_eq!(board.stone_count(), 2);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE, TOTAL_CELLS, WIN_LENGTH};
pub use config::{Config, ConfigError};
pub use engine::{AIEngine, Difficulty, EngineError};
pub use game::{GameMode, GameOutcome, GameState, MoveError};
pub use search::SearchResult;
