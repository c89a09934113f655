//! Headless game session: turns, outcome, undo and a background AI player

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::Config;
use crate::engine::{AIEngine, Difficulty};
use crate::search::SearchResult;
use crate::{Board, Pos, Stone};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human_color: Stone },
    /// Player vs Player (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_color: Stone::Black,
        }
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win {
        winner: Stone,
        line: Option<[Pos; 5]>,
    },
    Draw,
}

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,
    #[error("the AI is still thinking")]
    AiThinking,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("{0} is outside the board")]
    OutOfBounds(Pos),
    #[error("{0} is already occupied")]
    Occupied(Pos),
}

/// AI computation state
enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<SearchResult>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    board: Board,
    mode: GameMode,
    current_turn: Stone,
    outcome: Option<GameOutcome>,
    move_history: Vec<(Pos, Stone)>,
    difficulty: Difficulty,
    engine: Arc<AIEngine>,
    ai_state: AiState,
    last_ai_result: Option<SearchResult>,
    last_ai_time: Option<Duration>,
}

impl GameState {
    pub fn new(mode: GameMode, difficulty: Difficulty, engine: Arc<AIEngine>) -> Self {
        Self {
            board: Board::new(),
            mode,
            current_turn: Stone::Black,
            outcome: None,
            move_history: Vec::new(),
            difficulty,
            engine,
            ai_state: AiState::Idle,
            last_ai_result: None,
            last_ai_time: None,
        }
    }

    /// PvE game with the colors and difficulty from `config`
    pub fn from_config(config: &Config, engine: Arc<AIEngine>) -> Self {
        let human_color = if config.game.human_first {
            Stone::Black
        } else {
            Stone::White
        };
        Self::new(GameMode::PvE { human_color }, config.game.difficulty, engine)
    }

    /// Start over with an empty board, keeping mode and difficulty.
    ///
    /// A search still running in the background is abandoned.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_turn = Stone::Black;
        self.outcome = None;
        self.move_history.clear();
        self.ai_state = AiState::Idle;
        self.last_ai_result = None;
        self.last_ai_time = None;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[inline]
    pub fn move_history(&self) -> &[(Pos, Stone)] {
        &self.move_history
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect from the next AI search
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Statistics of the last AI move played
    pub fn last_ai_result(&self) -> Option<&SearchResult> {
        self.last_ai_result.as_ref()
    }

    pub fn last_ai_time(&self) -> Option<Duration> {
        self.last_ai_time
    }

    /// The AI's color, `None` in PvP
    pub fn ai_color(&self) -> Option<Stone> {
        match self.mode {
            GameMode::PvE { human_color } => Some(human_color.opponent()),
            GameMode::PvP => None,
        }
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn == human_color,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Play a human move for the side to move.
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.is_ai_thinking() {
            return Err(MoveError::AiThinking);
        }
        if !self.is_human_turn() {
            return Err(MoveError::NotYourTurn);
        }
        self.execute_move(pos)
    }

    /// Place a stone for the side to move, then settle the outcome or pass
    /// the turn.
    fn execute_move(&mut self, pos: Pos) -> Result<(), MoveError> {
        if !pos.is_on_board() {
            return Err(MoveError::OutOfBounds(pos));
        }
        let color = self.current_turn;
        if !self.board.place(pos, color) {
            return Err(MoveError::Occupied(pos));
        }
        self.move_history.push((pos, color));
        debug!("move {}: {:?} at {}", self.move_history.len(), color, pos);

        let winner = self.board.check_winner();
        if winner != Stone::Empty {
            info!("{:?} wins after {} moves", winner, self.move_history.len());
            self.outcome = Some(GameOutcome::Win {
                winner,
                line: self.board.winning_line(),
            });
        } else if self.board.is_full() {
            info!("board full, game drawn");
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.current_turn = color.opponent();
        }
        Ok(())
    }

    /// Start the AI search on a background thread.
    ///
    /// Returns false (and does nothing) unless it is the AI's turn in a live
    /// game with no search already running.
    pub fn start_ai_thinking(&mut self) -> bool {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.outcome.is_some() {
            return false;
        }

        let board = self.board.clone();
        let own = self.current_turn;
        let difficulty = self.difficulty;
        let engine = Arc::clone(&self.engine);
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.search(&board, own, own.opponent(), difficulty);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
        true
    }

    /// Apply the AI move if the search has finished; never blocks.
    ///
    /// Returns the move played, if any.
    pub fn poll_ai_result(&mut self) -> Option<Pos> {
        let received = match &self.ai_state {
            AiState::Thinking { receiver, .. } => match receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => None,
            },
            AiState::Idle => return None,
        };
        self.finish_ai_move(received)
    }

    /// Block until the running search finishes, then apply its move.
    pub fn wait_ai_result(&mut self) -> Option<Pos> {
        let received = match &self.ai_state {
            AiState::Thinking { receiver, .. } => receiver.recv().ok(),
            AiState::Idle => return None,
        };
        self.finish_ai_move(received)
    }

    fn finish_ai_move(&mut self, received: Option<SearchResult>) -> Option<Pos> {
        let elapsed = self.ai_thinking_elapsed();
        self.ai_state = AiState::Idle;

        let Some(result) = received else {
            warn!("AI search thread ended without a result");
            return None;
        };
        self.last_ai_time = elapsed;
        let best_move = result.best_move;
        self.last_ai_result = Some(result);

        let pos = best_move?;
        match self.execute_move(pos) {
            Ok(()) => Some(pos),
            Err(e) => {
                warn!("AI move {} rejected: {}", pos, e);
                None
            }
        }
    }

    /// Time spent on the running search
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Engine suggestion for the side to move, searched on this thread.
    pub fn request_suggestion(&self) -> Option<Pos> {
        if self.outcome.is_some() {
            return None;
        }
        let own = self.current_turn;
        self.engine
            .best_move(&self.board, own, own.opponent(), self.difficulty)
    }

    /// Take back the last move, or the last human and AI moves in PvE.
    ///
    /// Returns false if there was nothing to undo or the AI is thinking.
    pub fn undo(&mut self) -> bool {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return false;
        }

        let undo_count = match (self.mode, self.move_history.last()) {
            (GameMode::PvE { human_color }, Some(&(_, last)))
                if last != human_color && self.move_history.len() >= 2 =>
            {
                2
            }
            _ => 1,
        };

        for _ in 0..undo_count {
            if let Some((pos, color)) = self.move_history.pop() {
                self.board.remove(pos);
                self.current_turn = color;
            }
        }
        self.outcome = None;
        debug!("undid {} move(s), {:?} to play", undo_count, self.current_turn);
        true
    }
}
