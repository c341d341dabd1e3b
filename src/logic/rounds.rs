//! Round calculus: round count from field size, round label from position.

use crate::models::Round;

/// Number of rounds for `n` teams: `ceil(log2(n))`. Zero for fewer than 2 teams.
pub fn total_rounds(n: usize) -> u32 {
    if n < 2 {
        return 0;
    }
    usize::BITS - (n - 1).leading_zeros()
}

/// Label a round by its distance from the final. Rounds earlier than the
/// round of 16 also get `Round16` (only four labels exist).
pub fn round_label(total_rounds: u32, round_number: u32) -> Round {
    match total_rounds.saturating_sub(round_number) {
        0 => Round::Final,
        1 => Round::Semi,
        2 => Round::Quarter,
        _ => Round::Round16,
    }
}
