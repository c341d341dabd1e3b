//! Team data structures: roster, captain, registration metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in rosters and duplicate checks).
pub type PlayerId = Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// A registered team: captain plus an ordered roster and optional substitutes.
/// Immutable once the tournament's bracket has been generated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub captain_id: PlayerId,
    /// Ordered main roster.
    pub player_ids: Vec<PlayerId>,
    #[serde(default)]
    pub substitute_ids: Vec<PlayerId>,
    pub registered_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with a fresh id, registered now.
    pub fn new(
        name: impl Into<String>,
        captain_id: PlayerId,
        player_ids: Vec<PlayerId>,
        substitute_ids: Vec<PlayerId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            captain_id,
            player_ids,
            substitute_ids,
            registered_at: Utc::now(),
        }
    }

    /// Every player id attached to this team: captain, roster, substitutes.
    pub fn all_member_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        std::iter::once(self.captain_id)
            .chain(self.player_ids.iter().copied())
            .chain(self.substitute_ids.iter().copied())
    }
}
