//! Fixed-depth minimax with alpha-beta pruning
//!
//! The root move list is scored and ordered once, then every root move is
//! searched to the same fixed depth with a full window. When the list is long
//! enough the root moves are split across the rayon pool, each worker on its
//! own clone of the board; otherwise they run in order on one working board.
//!
//! # Example
//!
//! ```
//! use gobang::board::{Board, Pos, Stone};
//! use gobang::search::Searcher;
//!
//! let searcher = Searcher::new(4, false);
//! let mut board = Board::new();
//! board.place(Pos::CENTER, Stone::Black);
//!
//! let result = searcher.search(&board, Stone::White, Stone::Black, 1);
//! assert!(result.best_move.is_some());
//! ```

use log::{debug, trace};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, evaluate_parallel, score_move, PatternScore};

use super::guard::PlacedStone;

/// Score of a position the searching side has already won.
///
/// Far above anything the static evaluation reaches without a five on the
/// board, so a forced win always beats a good-looking position.
pub const WIN_SCORE: i32 = 100 * PatternScore::FIVE;
/// Score of a position the searching side has already lost
pub const LOSS_SCORE: i32 = -WIN_SCORE;
/// Score of a full board with no five
pub const DRAW_SCORE: i32 = 0;

/// Bound for the alpha-beta window
const INF: i32 = WIN_SCORE + 1_000;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` when the board has no empty cell
    pub best_move: Option<Pos>,
    /// Minimax value of the best move from the searching side's view
    pub score: i32,
    /// Plies searched below each root move
    pub depth: u8,
    /// Total nodes visited, summed over workers
    pub nodes: u64,
    /// Whether the root moves were split across the thread pool
    pub parallel: bool,
}

impl SearchResult {
    fn no_move(depth: u8) -> Self {
        Self {
            best_move: None,
            score: DRAW_SCORE,
            depth,
            nodes: 0,
            parallel: false,
        }
    }

    /// True if the best move leads to a forced win within the search depth
    #[must_use]
    pub fn is_forced_win(&self) -> bool {
        self.best_move.is_some() && self.score > WIN_SCORE - TERMINAL_MARGIN
    }

    /// True if every move loses within the search depth
    #[must_use]
    pub fn is_forced_loss(&self) -> bool {
        self.best_move.is_some() && self.score < LOSS_SCORE + TERMINAL_MARGIN
    }
}

/// Terminal scores sit within this distance of `WIN_SCORE`/`LOSS_SCORE`
const TERMINAL_MARGIN: i32 = 1_000;

// =============================================================================
// WorkerSearcher: per-task search state
// =============================================================================

/// Search state owned by one sequential run or one parallel root task.
struct WorkerSearcher {
    own: Stone,
    opponent: Stone,
    max_depth: u8,
    parallel_eval: bool,
    nodes: u64,
}

impl WorkerSearcher {
    fn new(own: Stone, opponent: Stone, max_depth: u8, parallel_eval: bool) -> Self {
        Self {
            own,
            opponent,
            max_depth,
            parallel_eval,
            nodes: 0,
        }
    }

    /// Play `mov` for the searching side and return its minimax value.
    ///
    /// The stone is gone again once this returns.
    fn search_move(&mut self, board: &mut Board, mov: Pos) -> i32 {
        let Some(mut placed) = PlacedStone::place(board, mov, self.own) else {
            return -INF;
        };
        self.alpha_beta(&mut placed, 0, -INF, INF, false)
    }

    /// `depth` counts plies already played below the root move.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        let winner = board.check_winner();
        if winner == self.own {
            return WIN_SCORE - i32::from(depth);
        }
        if winner == self.opponent {
            return LOSS_SCORE + i32::from(depth);
        }
        if board.is_full() {
            return DRAW_SCORE;
        }
        if depth >= self.max_depth {
            return self.evaluate(board);
        }

        let (mover, other) = if maximizing {
            (self.own, self.opponent)
        } else {
            (self.opponent, self.own)
        };
        let moves = ordered_moves(board, mover, other);

        if maximizing {
            let mut best = -INF;
            for mov in moves {
                let Some(mut placed) = PlacedStone::place(board, mov, mover) else {
                    continue;
                };
                let score = self.alpha_beta(&mut placed, depth + 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for mov in moves {
                let Some(mut placed) = PlacedStone::place(board, mov, mover) else {
                    continue;
                };
                let score = self.alpha_beta(&mut placed, depth + 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    #[inline]
    fn evaluate(&self, board: &Board) -> i32 {
        if self.parallel_eval {
            evaluate_parallel(board, self.own, self.opponent)
        } else {
            evaluate(board, self.own, self.opponent)
        }
    }
}

/// Moves to try for `mover`, best-looking first.
///
/// Uses the neighbourhood candidates, or every empty cell when there are
/// none. The sort is stable, so equal scores keep row-major order.
fn ordered_moves(board: &Board, mover: Stone, other: Stone) -> Vec<Pos> {
    let mut moves = board.candidate_positions();
    if moves.is_empty() {
        moves = board.empty_positions().collect();
    }
    let mut scored: Vec<(Pos, i32)> = moves
        .into_iter()
        .map(|mov| (mov, score_move(board, mov, mover, other)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(mov, _)| mov).collect()
}

/// Highest score wins; equal scores go to the smallest (row, col).
fn pick_best(scored: &[(Pos, i32)]) -> Option<(Pos, i32)> {
    scored
        .iter()
        .copied()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
}

/// Fixed-depth alpha-beta searcher.
///
/// Holds only settings, so one searcher can serve any number of searches and
/// is safe to share between threads.
pub struct Searcher {
    parallel_threshold: usize,
    parallel_eval: bool,
    /// Dedicated pool; `None` runs on rayon's global pool
    pool: Option<ThreadPool>,
}

impl Searcher {
    /// Create a searcher on the global rayon pool.
    ///
    /// # Arguments
    ///
    /// * `parallel_threshold` - Root move count above which the root is split
    /// * `parallel_eval` - Use the row-parallel static evaluation at leaves
    #[must_use]
    pub fn new(parallel_threshold: usize, parallel_eval: bool) -> Self {
        Self {
            parallel_threshold,
            parallel_eval,
            pool: None,
        }
    }

    /// Create a searcher with its own pool of `num_threads` workers.
    ///
    /// `num_threads == 0` falls back to the global pool.
    pub fn with_threads(
        parallel_threshold: usize,
        parallel_eval: bool,
        num_threads: usize,
    ) -> Result<Self, ThreadPoolBuildError> {
        let pool = if num_threads == 0 {
            None
        } else {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .thread_name(|i| format!("gobang-search-{i}"))
                    .build()?,
            )
        };
        Ok(Self {
            parallel_threshold,
            parallel_eval,
            pool,
        })
    }

    /// Search `board` for `own`'s best move, `max_depth` plies below each
    /// root move.
    ///
    /// The caller's board is never modified.
    #[must_use]
    pub fn search(&self, board: &Board, own: Stone, opponent: Stone, max_depth: u8) -> SearchResult {
        let moves = ordered_moves(board, own, opponent);
        if moves.is_empty() {
            return SearchResult::no_move(max_depth);
        }

        let parallel = moves.len() > self.parallel_threshold;
        let (scored, nodes) = if parallel {
            self.search_parallel(board, &moves, own, opponent, max_depth)
        } else {
            self.search_sequential(board, &moves, own, opponent, max_depth)
        };

        for (mov, score) in &scored {
            trace!("root {} -> {}", mov, score);
        }

        let Some((best_move, score)) = pick_best(&scored) else {
            return SearchResult::no_move(max_depth);
        };
        debug!(
            "searched {} root moves ({}), best {} score {} nodes {}",
            moves.len(),
            if parallel { "parallel" } else { "sequential" },
            best_move,
            score,
            nodes
        );

        SearchResult {
            best_move: Some(best_move),
            score,
            depth: max_depth,
            nodes,
            parallel,
        }
    }

    /// Root moves in order on one working board.
    fn search_sequential(
        &self,
        board: &Board,
        moves: &[Pos],
        own: Stone,
        opponent: Stone,
        max_depth: u8,
    ) -> (Vec<(Pos, i32)>, u64) {
        let mut work_board = board.clone();
        let mut worker = WorkerSearcher::new(own, opponent, max_depth, self.parallel_eval);
        let scored = moves
            .iter()
            .map(|&mov| (mov, worker.search_move(&mut work_board, mov)))
            .collect();
        (scored, worker.nodes)
    }

    /// One rayon task per root move, each on its own board clone.
    ///
    /// `collect` keeps the output in root-move order whatever order the
    /// tasks finish in.
    fn search_parallel(
        &self,
        board: &Board,
        moves: &[Pos],
        own: Stone,
        opponent: Stone,
        max_depth: u8,
    ) -> (Vec<(Pos, i32)>, u64) {
        let parallel_eval = self.parallel_eval;
        let run = || {
            moves
                .par_iter()
                .map(|&mov| {
                    let mut local = board.clone();
                    let mut worker = WorkerSearcher::new(own, opponent, max_depth, parallel_eval);
                    let score = worker.search_move(&mut local, mov);
                    (mov, score, worker.nodes)
                })
                .collect::<Vec<_>>()
        };
        let results = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let nodes = results.iter().map(|&(_, _, n)| n).sum();
        let scored = results.into_iter().map(|(mov, score, _)| (mov, score)).collect();
        (scored, nodes)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(4, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in black {
            board.place(Pos::new(r, c), Stone::Black);
        }
        for &(r, c) in white {
            board.place(Pos::new(r, c), Stone::White);
        }
        board
    }

    #[test]
    fn test_search_empty_board_takes_center() {
        let searcher = Searcher::default();
        let result = searcher.search(&Board::new(), Stone::Black, Stone::White, 2);
        assert_eq!(result.best_move, Some(Pos::CENTER));
        assert!(!result.parallel);
    }

    #[test]
    fn test_search_full_board_has_no_move() {
        let mut board = Board::new();
        for idx in 0..crate::board::TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            // Alternate in pairs of columns so no five forms in any direction
            let stone = if ((pos.col / 2) + pos.row) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place(pos, stone);
        }
        assert!(board.is_full());
        let result = Searcher::default().search(&board, Stone::Black, Stone::White, 2);
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let board = board_with(&[(9, 0), (9, 1), (9, 2), (9, 3)], &[(5, 5), (5, 6), (6, 6)]);
        let result = Searcher::default().search(&board, Stone::Black, Stone::White, 1);
        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert_eq!(result.score, WIN_SCORE);
        assert!(result.is_forced_win());
    }

    #[test]
    fn test_search_blocks_opponent_four() {
        // White threatens (3,7); black at (3,2) has already closed the left end
        let board = board_with(&[(3, 2), (10, 10)], &[(3, 3), (3, 4), (3, 5), (3, 6)]);
        for depth in 1..=2 {
            let result = Searcher::default().search(&board, Stone::Black, Stone::White, depth);
            assert_eq!(result.best_move, Some(Pos::new(3, 7)), "depth {depth}");
        }
    }

    #[test]
    fn test_search_losing_score_when_two_threats() {
        // Two separate open fours for white: black cannot stop both
        let board = board_with(
            &[(0, 14), (14, 14), (14, 0), (0, 0)],
            &[(3, 3), (3, 4), (3, 5), (3, 6), (10, 3), (10, 4), (10, 5), (10, 6)],
        );
        let result = Searcher::default().search(&board, Stone::Black, Stone::White, 1);
        assert!(result.is_forced_loss());
        assert_eq!(result.score, LOSS_SCORE + 1);
    }

    #[test]
    fn test_search_does_not_mutate_caller_board() {
        let board = board_with(&[(7, 7), (7, 8)], &[(6, 7), (8, 8)]);
        let before = board.to_grid();
        let last = board.last_move();
        let _ = Searcher::new(0, false).search(&board, Stone::Black, Stone::White, 2);
        let _ = Searcher::new(usize::MAX, false).search(&board, Stone::Black, Stone::White, 2);
        assert_eq!(board.to_grid(), before);
        assert_eq!(board.last_move(), last);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let boards = [
            board_with(&[(7, 7)], &[(7, 8)]),
            board_with(&[(7, 7), (8, 8), (6, 8)], &[(7, 8), (6, 6), (9, 9)]),
            board_with(&[(3, 3), (3, 4), (4, 4)], &[(2, 2), (5, 5)]),
        ];
        let sequential = Searcher::new(usize::MAX, false);
        let parallel = Searcher::new(0, false);
        for board in &boards {
            let a = sequential.search(board, Stone::Black, Stone::White, 2);
            let b = parallel.search(board, Stone::Black, Stone::White, 2);
            assert!(!a.parallel);
            assert!(b.parallel);
            assert_eq!(a.best_move, b.best_move);
            assert_eq!(a.score, b.score);
        }
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let board = board_with(&[(7, 7), (7, 9)], &[(8, 8)]);
        let global = Searcher::new(0, false);
        let pooled = Searcher::with_threads(0, false, 2).expect("thread pool");
        assert_eq!(
            global.search(&board, Stone::White, Stone::Black, 1),
            pooled.search(&board, Stone::White, Stone::Black, 1)
        );
    }

    #[test]
    fn test_parallel_eval_gives_same_result() {
        let board = board_with(&[(7, 7), (7, 8)], &[(6, 6)]);
        let plain = Searcher::new(4, false).search(&board, Stone::White, Stone::Black, 1);
        let rows = Searcher::new(4, true).search(&board, Stone::White, Stone::Black, 1);
        assert_eq!(plain.best_move, rows.best_move);
        assert_eq!(plain.score, rows.score);
    }

    #[test]
    fn test_pick_best_tie_breaks_on_smallest_pos() {
        let scored = [
            (Pos::new(5, 5), 10),
            (Pos::new(2, 9), 30),
            (Pos::new(2, 3), 30),
            (Pos::new(9, 0), -4),
        ];
        assert_eq!(pick_best(&scored), Some((Pos::new(2, 3), 30)));
        assert_eq!(pick_best(&[]), None);
    }

    #[test]
    fn test_ordered_moves_prefers_crowded_cells() {
        let board = board_with(&[(7, 7), (7, 8)], &[]);
        let moves = ordered_moves(&board, Stone::Black, Stone::White);
        // Six cells see both black stones; ties stay in row-major order
        let top = [
            Pos::new(6, 7),
            Pos::new(6, 8),
            Pos::new(7, 6),
            Pos::new(7, 9),
            Pos::new(8, 7),
            Pos::new(8, 8),
        ];
        assert_eq!(&moves[..6], &top);
        assert_eq!(moves.len(), board.candidate_positions().len());
        assert!(moves[6..]
            .iter()
            .all(|&m| score_move(&board, m, Stone::Black, Stone::White) < 20));
    }

    #[test]
    fn test_node_count_grows_with_depth() {
        let board = board_with(&[(7, 7)], &[(7, 8)]);
        let searcher = Searcher::default();
        let shallow = searcher.search(&board, Stone::Black, Stone::White, 1);
        let deeper = searcher.search(&board, Stone::Black, Stone::White, 2);
        assert!(shallow.nodes > 0);
        assert!(deeper.nodes > shallow.nodes);
        assert_eq!(deeper.depth, 2);
    }
}
