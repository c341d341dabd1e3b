//! Bracket builder: shuffle the field and emit the complete match tree for
//! every round up front. Seeding is uniform random shuffle only.

use crate::logic::rounds::{round_label, total_rounds};
use crate::models::{BracketMatch, ByePolicy, Team, TeamId, TBD};
use rand::seq::SliceRandom;

/// One slot-feeder in the round currently being paired.
#[derive(Clone)]
enum Entry {
    /// A known team (round 1, or carried forward through a bye).
    Team(TeamId, String),
    /// Winner of a feeder match, not yet known.
    Pending,
    /// No feeder at all; the slot can never be filled.
    Empty,
}

fn slot_fields(entry: &Entry) -> (Option<TeamId>, Option<String>) {
    match entry {
        Entry::Team(id, name) => (Some(*id), Some(name.clone())),
        Entry::Pending => (None, Some(TBD.to_string())),
        Entry::Empty => (None, None),
    }
}

/// Generate the full single-elimination bracket for the given teams.
///
/// The shuffled field is padded with empty slots up to the next power of two,
/// so the result always holds `2^total_rounds - 1` matches and every round's
/// matches exist from the start (later rounds with `"TBD"` slots). Returns an
/// empty list for fewer than 2 teams.
///
/// Match order within a round is the pairing order; `round_index / 2` locates
/// a winner's destination in the next round, so this order must be preserved.
pub fn generate_bracket(teams: &[Team], bye_policy: ByePolicy) -> Vec<BracketMatch> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut order: Vec<&Team> = teams.iter().collect();
    order.shuffle(&mut rand::thread_rng());

    let total = total_rounds(order.len());
    let field = 1usize << total;

    let mut entries: Vec<Entry> = order
        .iter()
        .map(|t| Entry::Team(t.id, t.name.clone()))
        .collect();
    entries.resize(field, Entry::Empty);

    let mut matches = Vec::with_capacity(field - 1);
    for round_number in 1..=total {
        let label = round_label(total, round_number);
        let pair_count = entries.len() / 2;
        let mut next = Vec::with_capacity(pair_count);
        for i in 0..pair_count {
            let a = entries[2 * i].clone();
            let b = entries[2 * i + 1].clone();

            let mut m = BracketMatch::new(label, round_number, i as u32);
            (m.team1_id, m.team1_name) = slot_fields(&a);
            (m.team2_id, m.team2_name) = slot_fields(&b);

            next.push(next_entry(&mut m, a, b, bye_policy));
            matches.push(m);
        }
        entries = next;
    }
    matches
}

/// Decide what the match feeds into the next round, pre-resolving byes when
/// the policy says so (the carry cascades because the team re-enters the
/// entry list as a known team).
fn next_entry(m: &mut BracketMatch, a: Entry, b: Entry, bye_policy: ByePolicy) -> Entry {
    match (a, b) {
        (Entry::Empty, Entry::Empty) => Entry::Empty,
        (Entry::Team(id, name), Entry::Empty) | (Entry::Empty, Entry::Team(id, name))
            if bye_policy == ByePolicy::AutoAdvance =>
        {
            m.winner_id = Some(id);
            if m.team1_id == Some(id) {
                m.score1 = Some(1);
                m.score2 = Some(0);
            } else {
                m.score1 = Some(0);
                m.score2 = Some(1);
            }
            Entry::Team(id, name)
        }
        _ => Entry::Pending,
    }
}
