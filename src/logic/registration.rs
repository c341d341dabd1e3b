//! Registration gate: capacity and duplicate-player checks before a team
//! is admitted. No other validation (payment, eligibility) happens here.

use crate::models::{Team, Tournament, TournamentError};
use std::collections::HashSet;

/// Check whether `team` may register for `tournament`.
///
/// Rejects with `CapacityExceeded` when the field is full, or
/// `DuplicateRegistration` when the prospective captain or any roster or
/// substitute member already appears in a registered team (as captain or
/// roster member). Leaves the tournament untouched either way.
pub fn can_register(tournament: &Tournament, team: &Team) -> Result<(), TournamentError> {
    if tournament.teams.len() >= tournament.max_teams {
        return Err(TournamentError::CapacityExceeded);
    }

    let registered: HashSet<_> = tournament
        .teams
        .iter()
        .flat_map(|t| std::iter::once(t.captain_id).chain(t.player_ids.iter().copied()))
        .collect();

    for player_id in team.all_member_ids() {
        if registered.contains(&player_id) {
            return Err(TournamentError::DuplicateRegistration(player_id));
        }
    }

    Ok(())
}
