//! Match resolution: record a winner and propagate it into the next round.

use crate::models::{BracketMatch, TeamId, TournamentError};

/// Record `winner_team_id` as the winner of `match_id` and advance it into
/// the correct slot of the next round's match.
///
/// The winner must be one of the match's two teams; otherwise `InvalidWinner`
/// is returned and the bracket is left untouched. Explicit scores take
/// precedence; a missing side is defaulted relative to the other so the
/// winner stays ahead (absent loser score 0, absent winner score loser + 1).
///
/// Propagation is skip-if-occupied: a destination slot that already holds a
/// team is never overwritten, so resolving the same match twice is idempotent
/// and an earlier, different winner is never clobbered. The final match
/// propagates nowhere.
pub fn resolve_match(
    bracket: &mut [BracketMatch],
    match_id: &str,
    winner_team_id: TeamId,
    score1: Option<u32>,
    score2: Option<u32>,
) -> Result<(), TournamentError> {
    let pos = bracket
        .iter()
        .position(|m| m.id == match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;

    let winner_is_team1 = bracket[pos].team1_id == Some(winner_team_id);
    let winner_is_team2 = bracket[pos].team2_id == Some(winner_team_id);
    if !winner_is_team1 && !winner_is_team2 {
        return Err(TournamentError::InvalidWinner(winner_team_id));
    }

    let winner_name = bracket[pos]
        .team_name_of(winner_team_id)
        .map(str::to_string);

    let m = &mut bracket[pos];
    m.winner_id = Some(winner_team_id);
    (m.score1, m.score2) = normalized_scores(winner_is_team1, score1, score2);

    let next_round = m.round_number + 1;
    let source_index = m.round_index;
    let dest_index = source_index / 2;

    let dest = bracket
        .iter_mut()
        .find(|m| m.round_number == next_round && m.round_index == dest_index);
    let dest = match dest {
        Some(d) => d,
        // This was the final; nothing to advance into.
        None => return Ok(()),
    };

    let (slot_id, slot_name) = if source_index % 2 == 0 {
        (&mut dest.team1_id, &mut dest.team1_name)
    } else {
        (&mut dest.team2_id, &mut dest.team2_name)
    };
    if slot_id.is_none() {
        *slot_id = Some(winner_team_id);
        *slot_name = winner_name;
    }

    Ok(())
}

/// Fill in whichever score sides were not supplied, keeping the winner's
/// score strictly ahead of the loser's. Supplied values are never changed.
fn normalized_scores(
    winner_is_team1: bool,
    score1: Option<u32>,
    score2: Option<u32>,
) -> (Option<u32>, Option<u32>) {
    let (winner_given, loser_given) = if winner_is_team1 {
        (score1, score2)
    } else {
        (score2, score1)
    };
    let loser = loser_given.unwrap_or(0);
    let winner = winner_given.unwrap_or(loser + 1);
    if winner_is_team1 {
        (Some(winner), Some(loser))
    } else {
        (Some(loser), Some(winner))
    }
}

/// Winner of the final match, if the final has been resolved.
pub fn final_winner(bracket: &[BracketMatch]) -> Option<TeamId> {
    let last_round = bracket.iter().map(|m| m.round_number).max()?;
    bracket
        .iter()
        .find(|m| m.round_number == last_round)
        .and_then(|m| m.winner_id)
}
