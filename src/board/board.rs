//! Board facade: packed store plus a plain grid mirror

use super::packed::PackedBoard;
use super::{Pos, Stone, BOARD_SIZE};

/// Plain 2-D view of the board, `grid[row][col]`
pub type Grid = [[Stone; BOARD_SIZE]; BOARD_SIZE];

/// Game board.
///
/// Game logic runs on the bit-packed store; the grid mirror is kept for
/// consumers that want direct cell access. Every mutating call updates both,
/// so they always agree once the call returns.
#[derive(Debug)]
pub struct Board {
    packed: PackedBoard,
    grid: Grid,
}

impl Board {
    pub fn new() -> Self {
        Self {
            packed: PackedBoard::new(),
            grid: [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Build a board from a grid
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Self::new();
        board.copy_from(grid);
        board
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Remove every stone
    pub fn clear(&mut self) {
        self.packed.clear();
        self.grid = [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Replace the whole position with `grid`.
    ///
    /// A bulk load is not a move, so the last-move pointer is dropped and the
    /// next win check scans every stone.
    pub fn copy_from(&mut self, grid: &Grid) {
        self.packed.clear();
        for (r, row) in grid.iter().enumerate() {
            for (c, &stone) in row.iter().enumerate() {
                self.packed.place(Pos::new(r as u8, c as u8), stone);
            }
        }
        self.packed.forget_last_move();
        self.grid = *grid;
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.packed.get(pos)
    }

    /// Check if position is on the board and unoccupied
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.packed.is_empty(pos)
    }

    /// Place a stone; false if off the board or occupied
    #[inline]
    pub fn place(&mut self, pos: Pos, stone: Stone) -> bool {
        if self.packed.place(pos, stone) {
            self.grid[pos.row as usize][pos.col as usize] = stone;
            true
        } else {
            false
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove(&mut self, pos: Pos) {
        if pos.is_on_board() {
            self.packed.remove(pos);
            self.grid[pos.row as usize][pos.col as usize] = Stone::Empty;
        }
    }

    #[inline]
    pub fn check_winner(&self) -> Stone {
        self.packed.check_winner()
    }

    #[inline]
    pub fn winning_line(&self) -> Option<[Pos; 5]> {
        self.packed.winning_line()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.packed.is_full()
    }

    pub fn empty_positions(&self) -> impl Iterator<Item = Pos> {
        self.packed.empty_positions()
    }

    pub fn candidate_positions(&self) -> Vec<Pos> {
        self.packed.candidate_positions()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.packed.last_move()
    }

    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.packed.stone_count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.packed.is_board_empty()
    }

    /// The packed store, for code that works on bitboards directly
    #[inline]
    pub fn packed(&self) -> &PackedBoard {
        &self.packed
    }

    /// Read-only grid mirror
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owned copy of the grid mirror
    #[inline]
    pub fn to_grid(&self) -> Grid {
        self.grid
    }

    fn grid_from_packed(packed: &PackedBoard) -> Grid {
        let mut grid = [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = packed.get(Pos::new(r as u8, c as u8));
            }
        }
        grid
    }
}

impl Clone for Board {
    /// Clone the packed store and rebuild the mirror from it
    fn clone(&self) -> Self {
        let packed = self.packed.clone();
        let grid = Self::grid_from_packed(&packed);
        Self { packed, grid }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "   ")?;
        for c in 0..BOARD_SIZE {
            write!(f, "{:>3}", c)?;
        }
        writeln!(f)?;
        for (r, row) in self.grid.iter().enumerate() {
            write!(f, "{:>3}", r)?;
            for stone in row {
                write!(f, "{:>3}", stone.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
