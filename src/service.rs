//! TournamentService: the public operation surface. Every mutation is a
//! serialized read-modify-write against the document store, locked per
//! tournament id so concurrent updates to one tournament cannot clobber
//! each other.

use crate::logic::{
    finish_tournament, regenerate_bracket, register_team, resolve_match, start_tournament,
};
use crate::models::{
    BracketMatch, ByePolicy, PlayerId, Team, TeamId, Tournament, TournamentError, TournamentId,
};
use crate::store::{DocumentStore, MemoryStore, StoreError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Inputs for creating a tournament. `roster_size` and `bye_policy` fall
/// back to the tournament defaults (5 players, manual byes).
#[derive(Clone, Debug, Deserialize)]
pub struct CreateTournamentParams {
    pub name: String,
    pub max_teams: usize,
    #[serde(default)]
    pub roster_size: Option<usize>,
    #[serde(default)]
    pub bye_policy: Option<ByePolicy>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// A team registration request; ids are assigned on admission.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub captain_id: PlayerId,
    pub player_ids: Vec<PlayerId>,
    #[serde(default)]
    pub substitute_ids: Vec<PlayerId>,
}

pub struct TournamentService {
    store: Arc<dyn DocumentStore>,
    /// One lock per tournament id; taken for the full read-modify-write.
    locks: Mutex<HashMap<TournamentId, Arc<Mutex<()>>>>,
}

impl TournamentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Service backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn create_tournament(
        &self,
        params: CreateTournamentParams,
    ) -> Result<Tournament, TournamentError> {
        let mut t = Tournament::new(params.name, params.max_teams);
        if let Some(roster_size) = params.roster_size {
            t.roster_size = roster_size;
        }
        if let Some(bye_policy) = params.bye_policy {
            t.bye_policy = bye_policy;
        }
        t.start_date = params.start_date;
        t.end_date = params.end_date;
        self.store.put(t.id, t.clone()).map_err(store_err)?;
        log::info!(
            "Created tournament {} '{}' ({} team slots)",
            t.id,
            t.name,
            t.max_teams
        );
        Ok(t)
    }

    pub fn get_tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.store.get(id).map_err(store_err)
    }

    pub fn get_bracket(&self, id: TournamentId) -> Result<Vec<BracketMatch>, TournamentError> {
        Ok(self.get_tournament(id)?.bracket.unwrap_or_default())
    }

    /// Register a team; may auto-confirm the tournament and generate its
    /// bracket when the field fills up with complete rosters.
    pub fn register_team(
        &self,
        id: TournamentId,
        new_team: NewTeam,
    ) -> Result<Tournament, TournamentError> {
        let team = Team::new(
            new_team.name,
            new_team.captain_id,
            new_team.player_ids,
            new_team.substitute_ids,
        );
        let t = self.with_tournament(id, |t| register_team(t, team))?;
        if t.confirmed {
            log::info!("Tournament {} confirmed with {} teams", id, t.teams.len());
        }
        Ok(t)
    }

    /// Generate (or overwrite) the bracket from the current team list.
    pub fn generate_bracket(
        &self,
        id: TournamentId,
    ) -> Result<Vec<BracketMatch>, TournamentError> {
        let t = self.with_tournament(id, regenerate_bracket)?;
        Ok(t.bracket.unwrap_or_default())
    }

    /// Explicit redraw; same operation as generate, named for admin use.
    pub fn regenerate_bracket(
        &self,
        id: TournamentId,
    ) -> Result<Vec<BracketMatch>, TournamentError> {
        self.generate_bracket(id)
    }

    /// Record a match winner and propagate it into the next round.
    pub fn resolve_match(
        &self,
        id: TournamentId,
        match_id: &str,
        winner_team_id: TeamId,
        score1: Option<u32>,
        score2: Option<u32>,
    ) -> Result<Tournament, TournamentError> {
        self.with_tournament(id, |t| {
            let bracket = t
                .bracket
                .as_mut()
                .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
            resolve_match(bracket, match_id, winner_team_id, score1, score2)
        })
    }

    /// Admin start: fresh draw, status Ongoing.
    pub fn start_tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let t = self.with_tournament(id, start_tournament)?;
        log::info!("Tournament {} started with {} teams", id, t.teams.len());
        Ok(t)
    }

    /// Admin close: status Finished once the final is resolved.
    pub fn finish_tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let t = self.with_tournament(id, finish_tournament)?;
        log::info!("Tournament {} finished", id);
        Ok(t)
    }

    /// Read-modify-write under this tournament's lock. A failed put leaves
    /// the stored document untouched; the in-memory mutation is discarded.
    fn with_tournament<F>(&self, id: TournamentId, f: F) -> Result<Tournament, TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
    {
        let lock = self.lock_for(id)?;
        let _guard = lock
            .lock()
            .map_err(|_| TournamentError::Store("lock poisoned".to_string()))?;
        let mut t = self.store.get(id).map_err(store_err)?;
        f(&mut t)?;
        self.store.put(id, t.clone()).map_err(store_err)?;
        Ok(t)
    }

    fn lock_for(&self, id: TournamentId) -> Result<Arc<Mutex<()>>, TournamentError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| TournamentError::Store("lock poisoned".to_string()))?;
        // Evict entries no caller currently holds, so the table stays
        // bounded by in-flight operations; an evicted entry is simply
        // recreated on the next write to that tournament.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Ok(locks.entry(id).or_default().clone())
    }

    /// Number of per-tournament lock entries currently retained
    /// (in-flight or awaiting eviction). For diagnostics and tests.
    pub fn lock_count(&self) -> usize {
        self.locks.lock().map(|g| g.len()).unwrap_or(0)
    }
}

fn store_err(e: StoreError) -> TournamentError {
    match e {
        StoreError::NotFound => TournamentError::TournamentNotFound,
        StoreError::Backend(msg) => TournamentError::Store(msg),
    }
}
