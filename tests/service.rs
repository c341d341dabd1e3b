//! Integration tests for the service surface: store-backed read-modify-write.

use esport_tournament_web::{
    CreateTournamentParams, NewTeam, TournamentError, TournamentService, TournamentStatus,
};
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

fn params(name: &str, max_teams: usize) -> CreateTournamentParams {
    CreateTournamentParams {
        name: name.to_string(),
        max_teams,
        roster_size: None,
        bye_policy: None,
        start_date: None,
        end_date: None,
    }
}

fn new_team(name: &str, roster: usize) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        captain_id: Uuid::new_v4(),
        player_ids: (0..roster).map(|_| Uuid::new_v4()).collect(),
        substitute_ids: Vec::new(),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let service = TournamentService::in_memory();
    let created = service.create_tournament(params("Spring Cup", 8)).unwrap();
    assert_eq!(created.status, TournamentStatus::Upcoming);
    assert!(created.teams.is_empty());
    assert!(created.bracket.is_none());

    let fetched = service.get_tournament(created.id).unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Spring Cup");
}

#[test]
fn unknown_tournament_is_not_found() {
    let service = TournamentService::in_memory();
    assert_eq!(
        service.get_tournament(Uuid::new_v4()),
        Err(TournamentError::TournamentNotFound)
    );
    assert!(matches!(
        service.start_tournament(Uuid::new_v4()),
        Err(TournamentError::TournamentNotFound)
    ));
}

#[test]
fn bracket_is_empty_before_generation() {
    let service = TournamentService::in_memory();
    let t = service.create_tournament(params("Spring Cup", 8)).unwrap();
    assert!(service.get_bracket(t.id).unwrap().is_empty());
}

#[test]
fn generate_with_too_few_teams_is_a_noop() {
    let service = TournamentService::in_memory();
    let t = service.create_tournament(params("Spring Cup", 8)).unwrap();
    service.register_team(t.id, new_team("A", 5)).unwrap();
    assert!(service.generate_bracket(t.id).unwrap().is_empty());
}

#[test]
fn resolve_without_a_bracket_is_match_not_found() {
    let service = TournamentService::in_memory();
    let t = service.create_tournament(params("Spring Cup", 8)).unwrap();
    assert!(matches!(
        service.resolve_match(t.id, "match-1-0", Uuid::new_v4(), None, None),
        Err(TournamentError::MatchNotFound(_))
    ));
}

#[test]
fn failed_registration_does_not_persist() {
    let service = TournamentService::in_memory();
    let t = service.create_tournament(params("Spring Cup", 1)).unwrap();
    service.register_team(t.id, new_team("A", 1)).unwrap();
    assert_eq!(
        service.register_team(t.id, new_team("B", 5)),
        Err(TournamentError::CapacityExceeded)
    );
    assert_eq!(service.get_tournament(t.id).unwrap().teams.len(), 1);
}

#[test]
fn full_tournament_flow_through_the_service() {
    let service = TournamentService::in_memory();
    let mut p = params("Playoffs", 4);
    p.roster_size = Some(1);
    let t = service.create_tournament(p).unwrap();

    for name in ["A", "B", "C", "D"] {
        service.register_team(t.id, new_team(name, 1)).unwrap();
    }
    let confirmed = service.get_tournament(t.id).unwrap();
    assert!(confirmed.confirmed);
    assert_eq!(confirmed.status, TournamentStatus::Confirmed);
    assert_eq!(confirmed.bracket_matches().len(), 3);

    let started = service.start_tournament(t.id).unwrap();
    assert_eq!(started.status, TournamentStatus::Ongoing);

    // Play out the bracket, always advancing the team1 slot
    for round in 1..=2u32 {
        let bracket = service.get_bracket(t.id).unwrap();
        for m in bracket.iter().filter(|m| m.round_number == round) {
            let winner = m.team1_id.unwrap();
            service
                .resolve_match(t.id, &m.id, winner, None, None)
                .unwrap();
        }
    }

    let finished = service.finish_tournament(t.id).unwrap();
    assert_eq!(finished.status, TournamentStatus::Finished);
}

#[test]
fn concurrent_registrations_never_lose_updates_or_exceed_capacity() {
    let service = Arc::new(TournamentService::in_memory());
    let t = service.create_tournament(params("Rush Cup", 4)).unwrap();

    // 16 threads race to register against a field of 4. Writes to one
    // tournament are serialized, so exactly 4 land and the rest are
    // rejected at the gate; none of the successful writes may be lost.
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            let id = t.id;
            thread::spawn(move || service.register_team(id, new_team(&format!("T{i}"), 1)))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(TournamentError::CapacityExceeded)))
        .count();
    assert_eq!(admitted, 4);
    assert_eq!(rejected, 12);
    assert_eq!(service.get_tournament(t.id).unwrap().teams.len(), 4);
}

#[test]
fn concurrent_resolutions_all_persist() {
    let service = Arc::new(TournamentService::in_memory());
    let mut p = params("Playoffs", 8);
    p.roster_size = Some(1);
    let t = service.create_tournament(p).unwrap();
    for i in 0..8 {
        service
            .register_team(t.id, new_team(&format!("T{i}"), 1))
            .unwrap();
    }
    service.start_tournament(t.id).unwrap();

    // Resolve all four first-round matches from separate threads; every
    // winner write must survive the read-modify-write of the others.
    let bracket = service.get_bracket(t.id).unwrap();
    let handles: Vec<_> = bracket
        .iter()
        .filter(|m| m.round_number == 1)
        .map(|m| {
            let service = Arc::clone(&service);
            let id = t.id;
            let match_id = m.id.clone();
            let winner = m.team1_id.unwrap();
            thread::spawn(move || service.resolve_match(id, &match_id, winner, None, None))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    let after = service.get_bracket(t.id).unwrap();
    assert!(after
        .iter()
        .filter(|m| m.round_number == 1)
        .all(|m| m.is_resolved()));
    for semi in after.iter().filter(|m| m.round_number == 2) {
        assert!(semi.team1_id.is_some());
        assert!(semi.team2_id.is_some());
    }
}

#[test]
fn idle_tournament_locks_are_evicted() {
    let service = TournamentService::in_memory();
    let ids: Vec<_> = (0..20)
        .map(|i| {
            let t = service
                .create_tournament(params(&format!("Cup {i}"), 8))
                .unwrap();
            service.register_team(t.id, new_team("A", 5)).unwrap();
            t.id
        })
        .collect();

    // Nothing is in flight, so the next write sweeps every idle entry and
    // only its own lock remains.
    service.register_team(ids[0], new_team("B", 5)).unwrap();
    assert_eq!(service.lock_count(), 1);
}

#[test]
fn regenerate_overwrites_the_previous_draw() {
    let service = TournamentService::in_memory();
    let mut p = params("Playoffs", 4);
    p.roster_size = Some(1);
    let t = service.create_tournament(p).unwrap();
    for name in ["A", "B", "C", "D"] {
        service.register_team(t.id, new_team(name, 1)).unwrap();
    }

    let first = service.get_bracket(t.id).unwrap();
    let winner = first[0].team1_id.unwrap();
    service
        .resolve_match(t.id, &first[0].id, winner, None, None)
        .unwrap();

    let redrawn = service.regenerate_bracket(t.id).unwrap();
    assert_eq!(redrawn.len(), 3);
    assert!(redrawn.iter().all(|m| !m.is_resolved()));
}
