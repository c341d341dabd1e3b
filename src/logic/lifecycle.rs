//! Tournament lifecycle: registration with auto-confirmation, start,
//! bracket regeneration, and finish.

use crate::logic::bracket::generate_bracket;
use crate::logic::registration::can_register;
use crate::logic::resolve::final_winner;
use crate::models::{Team, Tournament, TournamentError, TournamentStatus};
use chrono::Utc;

/// Register a team: gate checks, append, then auto-confirm when the field
/// is full and every roster is complete.
///
/// Registration is only open while the tournament is Upcoming and not yet
/// confirmed (teams are immutable once a bracket exists).
pub fn register_team(tournament: &mut Tournament, team: Team) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Upcoming || tournament.confirmed {
        return Err(TournamentError::InvalidState);
    }
    can_register(tournament, &team)?;
    tournament.teams.push(team);

    if !tournament.confirmed
        && tournament.teams.len() == tournament.max_teams
        && tournament.all_rosters_complete()
    {
        tournament.bracket = Some(generate_bracket(&tournament.teams, tournament.bye_policy));
        tournament.confirmed = true;
        tournament.confirmed_at = Some(Utc::now());
        tournament.status = TournamentStatus::Confirmed;
    }

    Ok(())
}

/// Admin start: regenerate the bracket with a fresh shuffle and move to
/// Ongoing. Only valid from Upcoming or Confirmed, with at least 2 teams.
///
/// An auto-confirmed tournament that is then started gets a second,
/// independent draw; the confirmed bracket is discarded on purpose.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    match tournament.status {
        TournamentStatus::Upcoming | TournamentStatus::Confirmed => {}
        _ => return Err(TournamentError::InvalidState),
    }
    if tournament.teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }
    tournament.bracket = Some(generate_bracket(&tournament.teams, tournament.bye_policy));
    tournament.status = TournamentStatus::Ongoing;
    Ok(())
}

/// Explicitly redraw the bracket, overwriting whatever was there. Valid any
/// time before the tournament is finished. With fewer than 2 teams the
/// bracket comes back empty (generation is a no-op at that size).
pub fn regenerate_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status == TournamentStatus::Finished {
        return Err(TournamentError::InvalidState);
    }
    tournament.bracket = Some(generate_bracket(&tournament.teams, tournament.bye_policy));
    Ok(())
}

/// Admin close: only from Ongoing, and only once the final has a winner.
pub fn finish_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Ongoing {
        return Err(TournamentError::InvalidState);
    }
    if final_winner(tournament.bracket_matches()).is_none() {
        return Err(TournamentError::InvalidState);
    }
    tournament.status = TournamentStatus::Finished;
    Ok(())
}
