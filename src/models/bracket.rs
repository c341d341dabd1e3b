//! Bracket match and round structures for single-elimination play.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Placeholder name for a slot whose feeder match is not yet resolved.
pub const TBD: &str = "TBD";

/// Bracket tier, labeled by distance from the final. Only four labels exist;
/// tournaments with more rounds collapse the extra early rounds into `round16`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    Round16,
    Quarter,
    Semi,
    Final,
}

/// One match in the bracket. All rounds' matches exist from generation time;
/// later-round team slots stay `"TBD"` until a feeder match resolves, and a
/// bye slot (no feeder at all) stays `None`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    /// Stable id, `"match-<roundNumber>-<indexInRound>"`.
    pub id: String,
    pub round: Round,
    /// 1-based round number, counting from the first round.
    pub round_number: u32,
    /// 0-based position within the round. Winner propagation targets
    /// `round_index / 2` in the next round, so this order is authoritative.
    pub round_index: u32,
    pub team1_id: Option<TeamId>,
    pub team1_name: Option<String>,
    pub team2_id: Option<TeamId>,
    pub team2_name: Option<String>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub winner_id: Option<TeamId>,
}

impl BracketMatch {
    pub fn new(round: Round, round_number: u32, round_index: u32) -> Self {
        Self {
            id: format!("match-{}-{}", round_number, round_index),
            round,
            round_number,
            round_index,
            team1_id: None,
            team1_name: None,
            team2_id: None,
            team2_name: None,
            score1: None,
            score2: None,
            winner_id: None,
        }
    }

    /// Whether a winner has been recorded for this match.
    pub fn is_resolved(&self) -> bool {
        self.winner_id.is_some()
    }

    /// Name of the given team id within this match, if it occupies a slot.
    pub fn team_name_of(&self, team_id: TeamId) -> Option<&str> {
        if self.team1_id == Some(team_id) {
            self.team1_name.as_deref()
        } else if self.team2_id == Some(team_id) {
            self.team2_name.as_deref()
        } else {
            None
        }
    }
}
