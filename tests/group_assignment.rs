//! Integration tests for slot lookup, capacity and group assignment.

use esports_tournament_web::{
    can_create_group, decide, has_capacity, max_groups, resolve_slot, AssignmentEngine, Decision,
    Group, MemoryStore, Outcome, Rejection, Round, Slot, Team, Tournament, TournamentStore,
};
use std::sync::Arc;

const TITLE: &str = "Summer Cup";
const QUALIFIER: &str = "Qualifier 1";

fn tournament_with_round(total_teams: u32, per_group: u32) -> Tournament {
    let mut t = Tournament::new(TITLE, "bgmi", total_teams);
    t.rounds.push(Round::new(QUALIFIER, per_group));
    t
}

fn engine_for(t: Tournament) -> (Arc<MemoryStore>, AssignmentEngine) {
    let store = Arc::new(MemoryStore::with_tournaments([t]));
    let engine = AssignmentEngine::new(store.clone());
    (store, engine)
}

fn team(id: &str) -> Team {
    Team::new(id, format!("Team {id}")).with_members([format!("{id}-1"), format!("{id}-2")])
}

fn group_at(slot: &Slot, team_ids: &[&str]) -> Group {
    let mut g = Group::new(slot, team(team_ids[0]), "bgmi", 1);
    g.teams.extend(team_ids[1..].iter().map(|id| team(id)));
    g
}

async fn stored_round(store: &MemoryStore) -> Round {
    let snap = store.get_tournament(TITLE).await.unwrap().unwrap();
    snap.tournament.round(QUALIFIER).unwrap().clone()
}

#[test]
fn resolve_slot_matches_exact_date_and_time_only() {
    let evening = Slot::new("2024-01-01", "18:00");
    let mut round = Round::new(QUALIFIER, 4);
    round.groups.push(group_at(&Slot::new("2024-01-01", "17:00"), &["a"]));
    round.groups.push(group_at(&evening, &["b"]));

    assert_eq!(resolve_slot(&round, &evening), Some(1));
    assert_eq!(resolve_slot(&round, &Slot::new("2024-01-01", "18:00:00")), None);
    assert_eq!(resolve_slot(&round, &Slot::new("2024-01-02", "18:00")), None);
    // Read-only: asking again gives the same answer.
    assert_eq!(resolve_slot(&round, &evening), Some(1));
}

#[test]
fn resolve_slot_returns_earliest_group_at_a_shared_slot() {
    let slot = Slot::new("2024-01-01", "18:00");
    let mut round = Round::new(QUALIFIER, 2);
    round.groups.push(group_at(&Slot::new("2024-01-01", "17:00"), &["a"]));
    round.groups.push(group_at(&slot, &["b", "c"]));
    round.groups.push(group_at(&slot, &["d"]));

    // The full group at index 1 still wins over the one with room at index 2.
    assert_eq!(resolve_slot(&round, &slot), Some(1));
}

#[test]
fn resolve_slot_on_empty_round_is_none() {
    let round = Round::new(QUALIFIER, 2);
    assert_eq!(resolve_slot(&round, &Slot::new("2024-01-01", "18:00")), None);
}

#[test]
fn capacity_predicates() {
    let slot = Slot::new("2024-01-01", "18:00");
    let mut t = tournament_with_round(5, 2); // 5 / 2 = 2 groups max
    let round = t.round_mut(QUALIFIER).unwrap();
    round.groups.push(group_at(&slot, &["a"]));
    let round = t.round(QUALIFIER).unwrap().clone();

    assert!(has_capacity(&round.groups[0], &round));
    assert_eq!(max_groups(&round, &t), 2);
    assert!(can_create_group(&round, &t));

    let mut full = round.clone();
    full.groups[0].teams.push(team("b"));
    full.groups.push(group_at(&slot, &["c"]));
    assert!(!has_capacity(&full.groups[0], &full));
    assert!(!can_create_group(&full, &t));
}

#[test]
fn zero_teams_per_group_allows_nothing() {
    let t = tournament_with_round(8, 0);
    let round = t.round(QUALIFIER).unwrap();
    assert_eq!(max_groups(round, &t), 0);
    assert!(!can_create_group(round, &t));
    assert_eq!(
        decide(&t, QUALIFIER, &Slot::new("2024-01-01", "18:00")),
        Decision::Reject(Rejection::RoundFull)
    );
}

#[test]
fn full_slot_does_not_spill_into_another_group_at_same_slot() {
    let slot = Slot::new("2024-01-01", "18:00");
    let mut t = tournament_with_round(10, 2);
    let round = t.round_mut(QUALIFIER).unwrap();
    round.groups.push(group_at(&slot, &["a", "b"]));
    round.groups.push(group_at(&slot, &["c"]));

    // Only the first group at the slot is considered; it is full, so a new group is opened.
    assert_eq!(decide(&t, QUALIFIER, &slot), Decision::Create);
}

#[tokio::test]
async fn fills_group_then_opens_second_then_rejects() {
    let slot = Slot::new("2024-01-01", "18:00");
    let (store, engine) = engine_for(tournament_with_round(4, 2));

    let a = match engine.assign(TITLE, QUALIFIER, &slot, team("A")).await.unwrap() {
        Outcome::Placed(p) => p,
        other => panic!("expected placement, got {other:?}"),
    };
    assert!(a.created);

    let b = match engine.assign(TITLE, QUALIFIER, &slot, team("B")).await.unwrap() {
        Outcome::Placed(p) => p,
        other => panic!("expected placement, got {other:?}"),
    };
    assert!(!b.created);
    assert_eq!(b.group_id, a.group_id);

    let c = match engine.assign(TITLE, QUALIFIER, &slot, team("C")).await.unwrap() {
        Outcome::Placed(p) => p,
        other => panic!("expected placement, got {other:?}"),
    };
    assert!(c.created);
    assert_ne!(c.group_id, a.group_id);

    let d = engine.assign(TITLE, QUALIFIER, &slot, team("D")).await.unwrap();
    assert_eq!(d, Outcome::Rejected(Rejection::RoundFull));

    let round = stored_round(&store).await;
    assert_eq!(round.groups.len(), 2);
    let ids = |g: &Group| g.teams.iter().map(|t| t.team_id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&round.groups[0]), ["A", "B"]);
    assert_eq!(ids(&round.groups[1]), ["C"]);
    assert_eq!(round.groups[0].name, "Group 1");
    assert_eq!(round.groups[1].name, "Group 2");
    assert_eq!(round.groups[1].slot(), slot);
    assert!(round.groups[1].match_id.starts_with("bgmi #"));
    assert_eq!(round.groups[1].duration, "45");
}

#[tokio::test]
async fn placement_returns_the_written_tournament() {
    let slot = Slot::new("2024-01-01", "18:00");
    let (store, engine) = engine_for(tournament_with_round(4, 2));

    let placed = match engine.assign(TITLE, QUALIFIER, &slot, team("A")).await.unwrap() {
        Outcome::Placed(p) => p,
        other => panic!("expected placement, got {other:?}"),
    };
    let snap = store.get_tournament(TITLE).await.unwrap().unwrap();
    assert_eq!(placed.tournament, snap.tournament);
    assert_eq!(snap.version, 2);
}

#[tokio::test]
async fn different_times_get_different_groups() {
    let (store, engine) = engine_for(tournament_with_round(8, 4));

    for (id, time) in [("A", "18:00"), ("B", "19:00"), ("C", "18:00")] {
        let outcome = engine
            .assign(TITLE, QUALIFIER, &Slot::new("2024-01-01", time), team(id))
            .await
            .unwrap();
        assert!(outcome.is_placed());
    }

    let round = stored_round(&store).await;
    assert_eq!(round.groups.len(), 2);
    assert_eq!(round.groups[0].teams.len(), 2);
    assert_eq!(round.groups[1].teams.len(), 1);
    assert_eq!(round.groups[1].starting_at_time, "19:00");
}

#[tokio::test]
async fn unknown_qualifier_is_rejected_without_writing() {
    let slot = Slot::new("2024-01-01", "18:00");
    let (store, engine) = engine_for(tournament_with_round(4, 2));

    let outcome = engine.assign(TITLE, "Finals", &slot, team("A")).await.unwrap();
    assert_eq!(outcome, Outcome::Rejected(Rejection::RoundNotFound));

    let outcome = engine.assign("Winter Cup", QUALIFIER, &slot, team("A")).await.unwrap();
    assert_eq!(outcome, Outcome::Rejected(Rejection::RoundNotFound));

    let snap = store.get_tournament(TITLE).await.unwrap().unwrap();
    assert_eq!(snap.version, 1);
    assert!(snap.tournament.round(QUALIFIER).unwrap().groups.is_empty());
}

#[tokio::test]
async fn capacity_invariants_hold_over_many_requests() {
    let (store, engine) = engine_for(tournament_with_round(6, 2)); // at most 3 groups of 2
    let slots = [
        Slot::new("2024-01-01", "18:00"),
        Slot::new("2024-01-01", "20:00"),
    ];

    let mut placed = 0;
    for i in 0..12 {
        let slot = &slots[i % slots.len()];
        if engine
            .assign(TITLE, QUALIFIER, slot, team(&format!("T{i}")))
            .await
            .unwrap()
            .is_placed()
        {
            placed += 1;
        }

        let round = stored_round(&store).await;
        assert!(round.groups.len() <= 3);
        assert!(round.groups.iter().all(|g| g.teams.len() <= 2));
    }

    let round = stored_round(&store).await;
    assert_eq!(round.placed_teams(), placed);
    assert!(placed <= 6);
}

#[tokio::test]
async fn same_team_is_not_deduplicated() {
    let slot = Slot::new("2024-01-01", "18:00");
    let (store, engine) = engine_for(tournament_with_round(4, 2));

    assert!(engine.assign(TITLE, QUALIFIER, &slot, team("A")).await.unwrap().is_placed());
    assert!(engine.assign(TITLE, QUALIFIER, &slot, team("A")).await.unwrap().is_placed());

    let round = stored_round(&store).await;
    assert_eq!(round.groups[0].teams, vec![team("A"), team("A")]);
}
