//! Five-in-a-row detection on a single color's bitboard
//!
//! Only the stones of one color matter for a five, so every function here
//! takes that color's `Bitboard` directly. Overlines (six or more) count.

use crate::board::{Bitboard, Pos, DIRECTIONS, WIN_LENGTH};

/// Steps scanned each way from a stone; enough to see any five through it.
const REACH: i32 = WIN_LENGTH as i32 - 1;

/// Count stones of `stones` in one direction from `pos`, not counting `pos`.
/// Stops at the first gap, the board edge, or after `REACH` steps.
#[inline]
fn count_one_way(stones: &Bitboard, pos: Pos, dr: i32, dc: i32) -> usize {
    let mut count = 0;
    for step in 1..=REACH {
        match pos.offset(dr, dc, step) {
            Some(p) if stones.get(p) => count += 1,
            _ => break,
        }
    }
    count
}

/// Length of the run through `pos` along `(dr, dc)`, capped at nine.
#[inline]
pub fn run_through(stones: &Bitboard, pos: Pos, dr: i32, dc: i32) -> usize {
    1 + count_one_way(stones, pos, dr, dc) + count_one_way(stones, pos, -dr, -dc)
}

/// Fast five-in-a-row check through one stone.
///
/// Only the four lines through `pos` are examined, so this is the check to
/// run right after a stone lands on `pos`.
#[inline]
pub fn has_five_through(stones: &Bitboard, pos: Pos) -> bool {
    if !pos.is_on_board() || !stones.get(pos) {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_through(stones, pos, dr, dc) >= WIN_LENGTH)
}

/// Full scan: does any stone of this color sit on a five?
pub fn has_five(stones: &Bitboard) -> bool {
    stones.iter_ones().any(|pos| has_five_through(stones, pos))
}

/// The first five stones of a winning line through `pos`, if one exists.
pub fn five_line_through(stones: &Bitboard, pos: Pos) -> Option<[Pos; 5]> {
    if !pos.is_on_board() || !stones.get(pos) {
        return None;
    }
    for &(dr, dc) in &DIRECTIONS {
        if run_through(stones, pos, dr, dc) < WIN_LENGTH {
            continue;
        }
        // Walk back to the start of the run, then read five forward
        let back = count_one_way(stones, pos, -dr, -dc) as i32;
        let start = pos.offset(-dr, -dc, back)?;
        let mut line = [start; 5];
        for (i, cell) in line.iter_mut().enumerate().skip(1) {
            *cell = start.offset(dr, dc, i as i32)?;
        }
        return Some(line);
    }
    None
}

/// Winning line anywhere on the board for this color.
pub fn find_five_line(stones: &Bitboard) -> Option<[Pos; 5]> {
    stones
        .iter_ones()
        .find_map(|pos| five_line_through(stones, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stones(cells: &[(u8, u8)]) -> Bitboard {
        let mut bb = Bitboard::new();
        for &(r, c) in cells {
            bb.set(Pos::new(r, c));
        }
        bb
    }

    #[test]
    fn test_five_horizontal() {
        let bb = stones(&[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)]);
        assert!(has_five_through(&bb, Pos::new(7, 5)));
        assert!(has_five_through(&bb, Pos::new(7, 3)));
        assert!(has_five(&bb));
    }

    #[test]
    fn test_five_vertical_and_diagonals() {
        let vertical = stones(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert!(has_five(&vertical));

        let se = stones(&[(2, 2), (3, 3), (4, 4), (5, 5), (6, 6)]);
        assert!(has_five_through(&se, Pos::new(6, 6)));

        let sw = stones(&[(0, 14), (1, 13), (2, 12), (3, 11), (4, 10)]);
        assert!(has_five_through(&sw, Pos::new(2, 12)));
    }

    #[test]
    fn test_four_is_not_five() {
        let bb = stones(&[(7, 3), (7, 4), (7, 5), (7, 6)]);
        assert!(!has_five(&bb));
    }

    #[test]
    fn test_gap_breaks_five() {
        let bb = stones(&[(7, 3), (7, 4), (7, 6), (7, 7), (7, 8)]);
        assert!(!has_five(&bb));
    }

    #[test]
    fn test_overline_counts() {
        let bb = stones(&[(3, 1), (3, 2), (3, 3), (3, 4), (3, 5), (3, 6)]);
        assert!(has_five_through(&bb, Pos::new(3, 1)));
        assert!(has_five_through(&bb, Pos::new(3, 6)));
    }

    #[test]
    fn test_no_wrap_across_rows() {
        // Cells 12..=16 in index order straddle the row 0 / row 1 boundary
        let bb = stones(&[(0, 12), (0, 13), (0, 14), (1, 0), (1, 1)]);
        assert!(!has_five(&bb));
    }

    #[test]
    fn test_five_through_empty_cell_is_false() {
        let bb = stones(&[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)]);
        assert!(!has_five_through(&bb, Pos::new(8, 8)));
        assert!(!has_five_through(&bb, Pos::new(20, 20)));
    }

    #[test]
    fn test_five_line_extraction() {
        let bb = stones(&[(5, 9), (6, 8), (7, 7), (8, 6), (9, 5)]);
        let line = five_line_through(&bb, Pos::new(7, 7)).expect("diagonal five");
        assert_eq!(line[0], Pos::new(5, 9));
        assert_eq!(line[4], Pos::new(9, 5));
        assert_eq!(find_five_line(&bb), Some(line));
    }

    #[test]
    fn test_run_through_counts_both_ways() {
        let bb = stones(&[(4, 4), (4, 5), (4, 6)]);
        assert_eq!(run_through(&bb, Pos::new(4, 5), 0, 1), 3);
        assert_eq!(run_through(&bb, Pos::new(4, 5), 1, 0), 1);
    }
}
