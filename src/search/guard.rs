//! Scoped stone placement for the search tree.
//!
//! The recursive search places a stone, explores below it and must take it
//! back before trying the next sibling. [`PlacedStone`] ties the take-back to
//! scope exit, so an early `break` on a cutoff cannot leave a stray stone.

use std::ops::{Deref, DerefMut};

use crate::board::{Board, Pos, Stone};

/// A stone on `board` that is removed again when the guard is dropped.
///
/// Derefs to the board, so the guard can be passed wherever `&mut Board` is
/// expected while the stone is down.
pub struct PlacedStone<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl<'a> PlacedStone<'a> {
    /// Place `stone` at `pos`. Returns `None` if the placement is rejected
    /// (off the board, occupied, or `Stone::Empty`); the board is untouched
    /// in that case.
    pub fn place(board: &'a mut Board, pos: Pos, stone: Stone) -> Option<Self> {
        if board.place(pos, stone) {
            Some(Self { board, pos })
        } else {
            None
        }
    }
}

impl Deref for PlacedStone<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacedStone<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacedStone<'_> {
    fn drop(&mut self) {
        self.board.remove(self.pos);
    }
}
