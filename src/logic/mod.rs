//! Tournament business logic: rounds, bracket generation, match resolution,
//! lifecycle transitions, registration gating.

mod bracket;
mod lifecycle;
mod registration;
mod resolve;
mod rounds;

pub use bracket::generate_bracket;
pub use lifecycle::{finish_tournament, regenerate_bracket, register_team, start_tournament};
pub use registration::can_register;
pub use resolve::{final_winner, resolve_match};
pub use rounds::{round_label, total_rounds};
