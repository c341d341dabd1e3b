//! Tournament, TournamentStatus, and TournamentError.

use crate::models::bracket::BracketMatch;
use crate::models::team::{PlayerId, Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// No tournament with this id.
    TournamentNotFound,
    /// No match with this id in the bracket.
    MatchNotFound(String),
    /// Tournament already has `max_teams` registered teams.
    CapacityExceeded,
    /// A player on the prospective team is already registered with another team.
    DuplicateRegistration(PlayerId),
    /// The winner id is not one of the match's two teams.
    InvalidWinner(TeamId),
    /// Fewer than 2 teams: no bracket can be generated.
    NotEnoughTeams,
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// The backing store failed.
    Store(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::TournamentNotFound => write!(f, "Tournament not found"),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::CapacityExceeded => write!(f, "Tournament is full"),
            TournamentError::DuplicateRegistration(_) => {
                write!(f, "A player on this team is already registered")
            }
            TournamentError::InvalidWinner(_) => {
                write!(f, "Winner is not one of the match's teams")
            }
            TournamentError::NotEnoughTeams => write!(f, "Need at least 2 teams"),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::Store(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle state of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created; registration open.
    #[default]
    Upcoming,
    /// Full field with complete rosters; bracket generated.
    Confirmed,
    /// Admin started play; matches being resolved.
    Ongoing,
    /// Final resolved and admin closed the tournament.
    Finished,
}

/// What happens to a match whose opponent slot has no feeder (a bye).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByePolicy {
    /// Bye matches stay unresolved until an admin resolves them.
    #[default]
    Manual,
    /// The lone team wins 1-0 at generation time and is carried forward.
    AutoAdvance,
}

/// Full tournament state: teams, lifecycle status, and the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Registration capacity; used as-is even when not a power of two.
    pub max_teams: usize,
    /// Roster length a team needs before it counts toward auto-confirmation.
    pub roster_size: usize,
    pub bye_policy: ByePolicy,
    pub teams: Vec<Team>,
    pub status: TournamentStatus,
    pub confirmed: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// None until first generated. Written only by bracket generation and
    /// by match resolution's winner propagation.
    pub bracket: Option<Vec<BracketMatch>>,
}

impl Tournament {
    /// Create a new tournament in Upcoming state with no teams and no bracket.
    pub fn new(name: impl Into<String>, max_teams: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            max_teams,
            roster_size: 5,
            bye_policy: ByePolicy::default(),
            teams: Vec::new(),
            status: TournamentStatus::Upcoming,
            confirmed: false,
            confirmed_at: None,
            start_date: None,
            end_date: None,
            bracket: None,
        }
    }

    /// Look up a registered team by id.
    pub fn get_team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Whether every registered team has a complete main roster.
    pub fn all_rosters_complete(&self) -> bool {
        self.teams
            .iter()
            .all(|t| t.player_ids.len() >= self.roster_size)
    }

    /// The bracket as a slice, empty if none was generated yet.
    pub fn bracket_matches(&self) -> &[BracketMatch] {
        self.bracket.as_deref().unwrap_or(&[])
    }
}
