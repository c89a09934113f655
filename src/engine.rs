//! Main AI engine
//!
//! [`AIEngine`] binds a [`Searcher`] to a [`SearchConfig`] and turns a
//! difficulty tier into a fixed search depth. Every call is synchronous:
//! the caller's thread blocks until the move is chosen.
//!
//! # Example
//!
//! ```
//! use gobang::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let engine = AIEngine::new();
//! let mut board = Board::new();
//! board.place(Pos::CENTER, Stone::Black);
//!
//! if let Some(best_move) = engine.best_move(&board, Stone::White, Stone::Black, Difficulty::Easy) {
//!     println!("Play at {}", best_move);
//! }
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::board::{Board, Pos, Stone};
use crate::config::{Config, SearchConfig};
use crate::search::{SearchResult, Searcher};

/// Difficulty tier, each mapped to a fixed search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that names no difficulty tier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Errors raised while building an engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Main AI engine for Gobang.
///
/// Holds no per-game state, so one engine can answer for both colors and be
/// shared between threads behind an `Arc`.
pub struct AIEngine {
    searcher: Searcher,
    settings: SearchConfig,
}

impl AIEngine {
    /// Create an engine with the built-in defaults on the global rayon pool.
    #[must_use]
    pub fn new() -> Self {
        let settings = SearchConfig::default();
        Self {
            searcher: Searcher::new(settings.parallel_threshold, settings.parallel_eval),
            settings,
        }
    }

    /// Create an engine from a loaded configuration.
    ///
    /// Builds a dedicated thread pool when `search.threads > 0`.
    pub fn with_config(config: &Config) -> Result<Self, EngineError> {
        let settings = config.search.clone();
        let searcher = Searcher::with_threads(
            settings.parallel_threshold,
            settings.parallel_eval,
            settings.threads,
        )?;
        Ok(Self { searcher, settings })
    }

    #[inline]
    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    /// Search depth used for `difficulty`
    #[inline]
    pub fn depth_for(&self, difficulty: Difficulty) -> u8 {
        self.settings.depth_for(difficulty)
    }

    /// Best move for `own` against `opponent`, or `None` if the board has no
    /// empty cell. `board` is left exactly as it was.
    ///
    /// # Example
    ///
    /// ```
    /// use gobang::{AIEngine, Board, Difficulty, Pos, Stone};
    ///
    /// let engine = AIEngine::new();
    /// let mut board = Board::new();
    /// for col in 0..4 {
    ///     board.place(Pos::new(9, col), Stone::Black);
    /// }
    /// let mov = engine.best_move(&board, Stone::Black, Stone::White, Difficulty::Easy);
    /// assert_eq!(mov, Some(Pos::new(9, 4)));
    /// ```
    #[must_use]
    pub fn best_move(
        &self,
        board: &Board,
        own: Stone,
        opponent: Stone,
        difficulty: Difficulty,
    ) -> Option<Pos> {
        self.search(board, own, opponent, difficulty).best_move
    }

    /// Same as [`best_move`](Self::best_move) with the search statistics.
    #[must_use]
    pub fn search(
        &self,
        board: &Board,
        own: Stone,
        opponent: Stone,
        difficulty: Difficulty,
    ) -> SearchResult {
        let depth = self.depth_for(difficulty);
        debug!(
            "{:?} to move, {} stones on board, {} depth {}",
            own,
            board.stone_count(),
            difficulty,
            depth
        );

        let start = Instant::now();
        let result = self.searcher.search(board, own, opponent, depth);
        let time_ms = start.elapsed().as_millis();

        match result.best_move {
            Some(mov) => info!(
                "{:?} plays {} (score {}, {} nodes, {}ms{})",
                own,
                mov,
                result.score,
                result.nodes,
                time_ms,
                if result.parallel { ", parallel" } else { "" }
            ),
            None => info!("{:?} has no legal move", own),
        }
        result
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
