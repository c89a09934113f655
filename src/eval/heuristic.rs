//! Heuristic evaluation for Gobang board positions
//!
//! Two functions live here:
//! - [`evaluate`]: static evaluation of a leaf position, used by the search
//!   once its depth limit is reached.
//! - [`score_move`]: cheap neighbourhood count used to order candidate moves
//!   before searching them.

use std::sync::atomic::{AtomicI32, Ordering};

use rayon::prelude::*;

use crate::board::{Board, Pos, Stone, BOARD_SIZE, DIRECTIONS};

use super::patterns::score_run;

/// Cells scanned each way from a stone when reading a run
const REACH: i32 = 4;

/// Move-ordering weight per own stone in line with the candidate
const OWN_WEIGHT: i32 = 10;
/// Move-ordering weight per opponent stone in line with the candidate
const OPPONENT_WEIGHT: i32 = 5;

/// Evaluate the board from the perspective of `own`.
///
/// Every stone contributes the pattern score of the run it sits in along
/// each of the four axes; `own` patterns add, `opponent` patterns subtract.
/// A run of length n is seen from each of its n stones, so longer runs
/// weigh proportionally more.
///
/// # Arguments
/// * `board` - The position to score
/// * `own` - Color the score is relative to (positive = good for `own`)
/// * `opponent` - The other side
#[must_use]
pub fn evaluate(board: &Board, own: Stone, opponent: Stone) -> i32 {
    let packed = board.packed();
    let mine: i32 = packed
        .stones(own)
        .map_or(0, |bits| bits.iter_ones().map(|pos| cell_score(board, pos, own)).sum());
    let theirs: i32 = packed
        .stones(opponent)
        .map_or(0, |bits| bits.iter_ones().map(|pos| cell_score(board, pos, opponent)).sum());
    mine - theirs
}

/// Same result as [`evaluate`], summed row by row on the rayon pool.
///
/// Each worker accumulates its row locally and folds it into a shared
/// atomic total once.
#[must_use]
pub fn evaluate_parallel(board: &Board, own: Stone, opponent: Stone) -> i32 {
    let total = AtomicI32::new(0);
    (0..BOARD_SIZE).into_par_iter().for_each(|row| {
        let mut local = 0;
        for col in 0..BOARD_SIZE {
            let pos = Pos::new(row as u8, col as u8);
            let stone = board.get(pos);
            if stone == Stone::Empty {
                continue;
            }
            if stone == own {
                local += cell_score(board, pos, own);
            } else if stone == opponent {
                local -= cell_score(board, pos, opponent);
            }
        }
        total.fetch_add(local, Ordering::Relaxed);
    });
    total.into_inner()
}

/// Pattern score of one stone summed over the four axes
#[inline]
fn cell_score(board: &Board, pos: Pos, color: Stone) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| line_score(board, pos, dr, dc, color))
        .sum()
}

/// Read the run through `pos` along `(dr, dc)` and score it
fn line_score(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let (ahead, blocked_after) = scan(board, pos, dr, dc, color);
    let (behind, blocked_before) = scan(board, pos, -dr, -dc, color);
    score_run(1 + ahead + behind, blocked_before, blocked_after)
}

/// Count same-color stones stepping away from `pos`, and report whether the
/// run ends against the edge or an opposing stone.
#[inline]
fn scan(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> (usize, bool) {
    let mut count = 0;
    for step in 1..=REACH {
        let Some(p) = pos.offset(dr, dc, step) else {
            return (count, true);
        };
        match board.get(p) {
            s if s == color => count += 1,
            Stone::Empty => return (count, false),
            _ => return (count, true),
        }
    }
    (count, false)
}

/// Ordering score for playing `mov` as `mover`.
///
/// Counts stones within four cells along each axis through `mov`; the
/// mover's own stones weigh twice as much as the other side's. Never
/// recurses, so it is cheap enough to call for every candidate.
#[must_use]
pub fn score_move(board: &Board, mov: Pos, mover: Stone, other: Stone) -> i32 {
    let mut score = 0;
    for &(dr, dc) in &DIRECTIONS {
        let mut own_count = 0;
        let mut other_count = 0;
        for step in (-REACH..=REACH).filter(|&s| s != 0) {
            let Some(p) = mov.offset(dr, dc, step) else {
                continue;
            };
            let stone = board.get(p);
            if stone == mover {
                own_count += 1;
            } else if stone == other {
                other_count += 1;
            }
        }
        score += own_count * OWN_WEIGHT + other_count * OPPONENT_WEIGHT;
    }
    score
}
