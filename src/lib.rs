//! E-sports tournament bracket engine: library with models, bracket logic,
//! document store, and the service operation surface.

pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use logic::{
    can_register, final_winner, finish_tournament, generate_bracket, regenerate_bracket,
    register_team, resolve_match, round_label, start_tournament, total_rounds,
};
pub use models::{
    BracketMatch, ByePolicy, PlayerId, Round, Team, TeamId, Tournament, TournamentError,
    TournamentId, TournamentStatus, TBD,
};
pub use service::{CreateTournamentParams, NewTeam, TournamentService};
pub use store::{DocumentStore, MemoryStore, StoreError};
