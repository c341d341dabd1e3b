//! Data structures for the tournament engine: teams, bracket matches, tournament state.

mod bracket;
mod team;
mod tournament;

pub use bracket::{BracketMatch, Round, TBD};
pub use team::{PlayerId, Team, TeamId};
pub use tournament::{
    ByePolicy, Tournament, TournamentError, TournamentId, TournamentStatus,
};
