//! Keyed-document collaborator: tournaments are read and written as whole
//! documents (no in-place partial updates).

use crate::models::{Tournament, TournamentId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Store-level failures, kept separate from domain errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// No document under this id.
    NotFound,
    /// The backend itself failed.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "Document not found"),
            StoreError::Backend(msg) => write!(f, "Store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Whole-document get/put over tournaments. `put` replaces the entire
/// document; callers own read-modify-write atomicity.
pub trait DocumentStore: Send + Sync {
    fn get(&self, id: TournamentId) -> Result<Tournament, StoreError>;
    fn put(&self, id: TournamentId, tournament: Tournament) -> Result<(), StoreError>;
}

/// In-memory store: a map behind an RwLock.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<TournamentId, Tournament>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, id: TournamentId) -> Result<Tournament, StoreError> {
        let g = self
            .documents
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        g.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn put(&self, id: TournamentId, tournament: Tournament) -> Result<(), StoreError> {
        let mut g = self
            .documents
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        g.insert(id, tournament);
        Ok(())
    }
}
