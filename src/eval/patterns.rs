//! Pattern scores for Gobang evaluation
//!
//! Each step down the ladder is roughly one order of magnitude, so a single
//! stronger shape outweighs any realistic pile of weaker ones.

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win
    pub const FIVE: i32 = 100_000;

    /// Open four: _OOOO_ (cannot be stopped)
    pub const OPEN_FOUR: i32 = 10_000;
    /// Closed four: XOOOO_ or _OOOOX (must be answered at once)
    pub const CLOSED_FOUR: i32 = 1_000;

    /// Open three: _OOO_ (becomes open four if not blocked)
    pub const OPEN_THREE: i32 = 1_000;
    /// Closed three: XOOO_ or _OOOX
    pub const CLOSED_THREE: i32 = 100;

    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 100;
    /// Closed two: XOO_ or _OOX
    pub const CLOSED_TWO: i32 = 10;

    /// A lone stone with room on at least one side
    pub const SINGLE: i32 = 1;
}

/// Score a contiguous run of `count` stones.
///
/// An end is blocked when it touches the board edge or an opposing stone.
/// Runs of five or more win outright whatever their ends; shorter runs
/// blocked at both ends can never grow into five and score nothing; they do
/// not fall back to the one-end-blocked weights.
#[must_use]
pub fn score_run(count: usize, blocked_before: bool, blocked_after: bool) -> i32 {
    if count >= 5 {
        return PatternScore::FIVE;
    }
    let open_ends = u8::from(!blocked_before) + u8::from(!blocked_after);
    match (count, open_ends) {
        (_, 0) => 0,
        (4, 2) => PatternScore::OPEN_FOUR,
        (4, _) => PatternScore::CLOSED_FOUR,
        (3, 2) => PatternScore::OPEN_THREE,
        (3, _) => PatternScore::CLOSED_THREE,
        (2, 2) => PatternScore::OPEN_TWO,
        (2, _) => PatternScore::CLOSED_TWO,
        _ => PatternScore::SINGLE,
    }
}
