//! Bitboard implementation for fast occupancy queries

use super::{Pos, TOTAL_CELLS};

/// Machine words needed for 225 cells (4 * 64 = 256 >= 225)
pub const WORDS: usize = TOTAL_CELLS.div_ceil(64);

/// Live bits in the final word (225 - 3 * 64 = 33)
const LAST_WORD_BITS: usize = TOTAL_CELLS - (WORDS - 1) * 64;

/// Mask of the live bits in the final word
const LAST_WORD_MASK: u64 = if LAST_WORD_BITS == 64 {
    u64::MAX
} else {
    (1u64 << LAST_WORD_BITS) - 1
};

/// Where a cell lives inside the word array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSlot {
    pub word: usize,
    pub offset: u32,
    pub mask: u64,
}

/// Cell index -> (word, bit offset, mask). Built once at compile time.
pub static CELL_SLOTS: [CellSlot; TOTAL_CELLS] = build_cell_slots();

const fn build_cell_slots() -> [CellSlot; TOTAL_CELLS] {
    let mut slots = [CellSlot {
        word: 0,
        offset: 0,
        mask: 0,
    }; TOTAL_CELLS];
    let mut idx = 0;
    while idx < TOTAL_CELLS {
        let offset = (idx % 64) as u32;
        slots[idx] = CellSlot {
            word: idx / 64,
            offset,
            mask: 1u64 << offset,
        };
        idx += 1;
    }
    slots
}

/// One bit per cell, 225 cells packed into 4 x u64
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Bitboard with every on-board cell set
    pub const fn full() -> Self {
        let mut bits = [u64::MAX; WORDS];
        bits[WORDS - 1] = LAST_WORD_MASK;
        Self { bits }
    }

    /// Set a bit at position; off-board positions are ignored
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        if !pos.is_on_board() {
            return;
        }
        let slot = &CELL_SLOTS[pos.to_index()];
        self.bits[slot.word] |= slot.mask;
    }

    /// Clear a bit at position; off-board positions are ignored
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        if !pos.is_on_board() {
            return;
        }
        let slot = &CELL_SLOTS[pos.to_index()];
        self.bits[slot.word] &= !slot.mask;
    }

    /// Check if bit is set at position; always false off the board
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        if !pos.is_on_board() {
            return false;
        }
        let slot = &CELL_SLOTS[pos.to_index()];
        self.bits[slot.word] & slot.mask != 0
    }

    /// Raw words, lowest cell index first
    #[inline]
    pub fn words(&self) -> &[u64; WORDS] {
        &self.bits
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// True when every one of the 225 cells is set
    #[inline]
    pub fn is_full(&self) -> bool {
        let last = WORDS - 1;
        self.bits[..last].iter().all(|&w| w == u64::MAX)
            && self.bits[last] & LAST_WORD_MASK == LAST_WORD_MASK
    }

    /// Cells not set here, restricted to the board
    #[inline]
    pub fn complement(&self) -> Self {
        let mut out = Self::full();
        for (o, w) in out.bits.iter_mut().zip(self.bits.iter()) {
            *o &= !w;
        }
        out
    }

    /// Iterate over set bit positions
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            word_idx: 0,
            current_word: self.bits[0],
        }
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        let mut bits = self.bits;
        for (b, r) in bits.iter_mut().zip(rhs.bits.iter()) {
            *b |= r;
        }
        Bitboard { bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: [u64; WORDS],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        // Skip all-zero words
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        let idx = self.word_idx * 64 + bit_pos;

        // Clear the bit we just found
        self.current_word &= self.current_word - 1;

        if idx < TOTAL_CELLS {
            Some(Pos::from_index(idx))
        } else {
            None
        }
    }
}
