//! Bit-packed board store
//!
//! Each cell is two independent bits, one in the black bitboard and one in
//! the white bitboard:
//!
//! | black | white | cell  |
//! |-------|-------|-------|
//! |   0   |   0   | Empty |
//! |   1   |   0   | Black |
//! |   0   |   1   | White |
//!
//! The fourth combination never exists: every mutation clears the other
//! color's bit when it sets one.

use super::bitboard::Bitboard;
use super::{Pos, Stone, NEIGHBOURS};
use crate::rules::{find_five_line, five_line_through, has_five, has_five_through};

/// Two color bitboards plus the last placed stone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBoard {
    black: Bitboard,
    white: Bitboard,
    /// Most recent placement; limits win checks to the lines through it
    last_move: Option<Pos>,
}

impl PackedBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every stone and forget the last move
    pub fn clear(&mut self) {
        self.black = Bitboard::new();
        self.white = Bitboard::new();
        self.last_move = None;
    }

    /// Get stone at position (`Empty` when off the board)
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if !pos.is_on_board() {
            Stone::Empty
        } else if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is on the board and unoccupied
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        pos.is_on_board() && !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone. Returns false when the cell is off the board, already
    /// occupied, or `stone` is `Empty`.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        match stone {
            Stone::Black => {
                self.black.set(pos);
                self.white.clear(pos);
            }
            Stone::White => {
                self.white.set(pos);
                self.black.clear(pos);
            }
            Stone::Empty => return false,
        }
        self.last_move = Some(pos);
        true
    }

    /// Clear both bits at `pos`. Removing the last move forgets it, so the
    /// next win check scans the whole board.
    pub fn remove(&mut self, pos: Pos) {
        if !pos.is_on_board() {
            return;
        }
        self.black.clear(pos);
        self.white.clear(pos);
        if self.last_move == Some(pos) {
            self.last_move = None;
        }
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Drop the last-move pointer without touching any stone
    #[inline]
    pub fn forget_last_move(&mut self) {
        self.last_move = None;
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Every occupied cell
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Color with five or more in a row, or `Empty`.
    ///
    /// With a last move on record only the four lines through it are
    /// examined: a new five must contain the stone that was just placed.
    /// Without one, every stone of each color is scanned.
    pub fn check_winner(&self) -> Stone {
        if let Some(pos) = self.last_move {
            let stone = self.get(pos);
            return match self.stones(stone) {
                Some(bits) if has_five_through(bits, pos) => stone,
                _ => Stone::Empty,
            };
        }

        if has_five(&self.black) {
            Stone::Black
        } else if has_five(&self.white) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Five stones of the winning line, if the game is won
    pub fn winning_line(&self) -> Option<[Pos; 5]> {
        if let Some(pos) = self.last_move {
            let bits = self.stones(self.get(pos))?;
            return five_line_through(bits, pos);
        }
        find_five_line(&self.black).or_else(|| find_five_line(&self.white))
    }

    /// True when all 225 cells hold a stone
    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied().is_full()
    }

    /// Lazily yield every empty cell in row-major order
    pub fn empty_positions(&self) -> impl Iterator<Item = Pos> {
        self.occupied().complement().iter_ones()
    }

    /// Empty cells adjacent (8-neighbourhood) to any stone, row-major and
    /// without duplicates. An empty board yields only the centre.
    pub fn candidate_positions(&self) -> Vec<Pos> {
        let occupied = self.occupied();
        let mut seen = Bitboard::new();

        for pos in occupied.iter_ones() {
            for &(dr, dc) in &NEIGHBOURS {
                if let Some(n) = pos.offset(dr, dc, 1) {
                    if !occupied.get(n) {
                        seen.set(n);
                    }
                }
            }
        }

        if seen.is_empty() && !occupied.is_full() {
            return vec![Pos::CENTER];
        }
        seen.iter_ones().collect()
    }
}
