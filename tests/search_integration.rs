//! Integration tests for dynamic-filter search over the in-memory store.

use pretty_assertions::assert_eq;

use rosterq::prelude::*;
use rosterq_memory::MemoryStore;

/// Two teams, four members: ages 10/20 in teamA, 10/20 in teamB.
fn roster_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert("team", Team::new(1, "teamA").into_row());
    store.insert("team", Team::new(2, "teamB").into_row());
    store.insert("member", Member::new(1, "member1", 10, Some(1)).into_row());
    store.insert("member", Member::new(2, "member2", 20, Some(1)).into_row());
    store.insert("member", Member::new(3, "member3", 10, Some(2)).into_row());
    store.insert("member", Member::new(4, "member4", 20, Some(2)).into_row());
    store
}

/// Forty members, one team each: member{i} is 20+i years old in team{i}.
fn large_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for i in 0..40i64 {
        store.insert("team", Team::new(i, format!("team{i}")).into_row());
        store.insert(
            "member",
            Member::new(i, format!("member{i}"), 20 + i, Some(i)).into_row(),
        );
    }
    store
}

fn usernames(rows: &[MemberTeamDto]) -> Vec<Option<&str>> {
    rows.iter().map(|dto| dto.username.as_deref()).collect()
}

#[test]
fn empty_condition_returns_every_row() {
    let repository = MemberSearchRepository::new(roster_store());
    let rows = repository.search(&MemberSearchCondition::new()).unwrap();
    assert_eq!(rows.len(), 4);
}

#[test]
fn age_lower_bound_alone_selects_older_members() {
    let repository = MemberSearchRepository::new(roster_store());
    let condition = MemberSearchCondition::new().age_goe(15);

    let rows = repository.search(&condition).unwrap();
    assert_eq!(rows.len(), 2);
    for dto in &rows {
        assert_eq!(dto.age, 20);
    }

    // The accumulator shape selects the same rows.
    let folded = repository.search_by_builder(&condition).unwrap();
    assert_eq!(rows, folded);
}

#[test]
fn both_composition_shapes_agree_on_mixed_conditions() {
    let repository = MemberSearchRepository::new(large_store());
    let condition = MemberSearchCondition::new()
        .age_goe(20)
        .age_loe(30)
        .team_name("team");

    let rows = repository.search(&condition).unwrap();
    let folded = repository.search_by_builder(&condition).unwrap();
    assert_eq!(rows, folded);
    assert_eq!(rows.len(), 11);
    assert!(usernames(&rows).contains(&Some("member10")));
}

#[test]
fn blank_text_criteria_behave_like_absent_ones() {
    let repository = MemberSearchRepository::new(roster_store());
    let blank = MemberSearchCondition::new().username("   ").team_name("");
    let empty = MemberSearchCondition::new();

    assert_eq!(
        repository.search(&blank).unwrap(),
        repository.search(&empty).unwrap()
    );
}

#[test]
fn combined_criteria_narrow_the_result() {
    let repository = MemberSearchRepository::new(roster_store());
    let rows = repository
        .search(
            &MemberSearchCondition::new()
                .username("member4")
                .team_name("teamB")
                .age_goe(15)
                .age_loe(25),
        )
        .unwrap();

    assert_eq!(usernames(&rows), vec![Some("member4")]);
    assert_eq!(rows[0].team_name.as_deref(), Some("teamB"));
}

#[test]
fn contradictory_range_matches_nothing_without_error() {
    let repository = MemberSearchRepository::new(roster_store());
    let rows = repository
        .search(&MemberSearchCondition::new().age_goe(30).age_loe(10))
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn find_by_username_returns_exact_matches() {
    let repository = MemberSearchRepository::new(roster_store());
    let rows = repository.find_by_username("member2").unwrap();
    assert_eq!(usernames(&rows), vec![Some("member2")]);
}

#[test]
fn find_by_blank_username_matches_nothing() {
    // The key lookup compares verbatim, unlike the optional search
    // criteria: a blank never widens into match-all.
    let repository = MemberSearchRepository::new(roster_store());
    assert!(repository.find_by_username("").unwrap().is_empty());
    assert!(repository.find_by_username("  ").unwrap().is_empty());
}

#[test]
fn search_one_returns_none_for_no_match() {
    let repository = MemberSearchRepository::new(roster_store());
    let found = repository
        .search_one(&MemberSearchCondition::new().username("nobody"))
        .unwrap();
    assert_eq!(found, None);
}

#[test]
fn search_one_rejects_ambiguous_matches() {
    let repository = MemberSearchRepository::new(roster_store());
    let err = repository
        .search_one(&MemberSearchCondition::new().age_goe(15))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotUnique);
}

#[test]
fn search_first_never_fails_on_many_matches() {
    let repository = MemberSearchRepository::new(roster_store());
    let first = repository
        .search_first(&MemberSearchCondition::new().age_goe(15))
        .unwrap();
    assert!(first.is_some());
}

#[test]
fn sorted_search_puts_unnamed_members_last() {
    let mut store = roster_store();
    store.insert("member", Member::unnamed(5, 100, Some(1)).into_row());
    store.insert("member", Member::new(6, "member5", 100, Some(1)).into_row());
    store.insert("member", Member::new(7, "member6", 100, Some(1)).into_row());

    let repository = MemberSearchRepository::new(store);
    let rows = repository
        .search_sorted(&MemberSearchCondition::new().age_goe(100))
        .unwrap();

    // Age desc, username asc, the unnamed member after all named ones.
    assert_eq!(
        usernames(&rows),
        vec![Some("member5"), Some("member6"), None]
    );
}

#[test]
fn inner_join_hides_members_without_a_team() {
    let mut store = roster_store();
    store.insert("member", Member::new(5, "member5", 30, None).into_row());

    let inner = MemberSearchRepository::new(store.clone());
    assert_eq!(inner.search(&MemberSearchCondition::new()).unwrap().len(), 4);

    let left =
        MemberSearchRepository::with_executor(RelationExecutor::new(store).left_join());
    let rows = left.search(&MemberSearchCondition::new()).unwrap();
    assert_eq!(rows.len(), 5);

    let orphan = rows.iter().find(|dto| dto.member_id == 5).unwrap();
    assert_eq!(orphan.team_id, None);
    assert_eq!(orphan.team_name, None);
}

#[test]
fn executor_reports_its_fetch_mode() {
    let plain = RelationExecutor::new(roster_store());
    assert_eq!(plain.fetch_mode(), FetchMode::Lazy);

    let fetched = RelationExecutor::new(roster_store()).fetch_join();
    assert_eq!(fetched.fetch_mode(), FetchMode::Eager);
    // The eager executor still returns the same rows.
    assert_eq!(fetched.fetch_all(&Filter::None).unwrap().len(), 4);
}

#[test]
fn store_failures_propagate_verbatim() {
    let repository = MemberSearchRepository::new(MemoryStore::new());
    let err = repository.search(&MemberSearchCondition::new()).unwrap_err();
    assert_eq!(err.code, ErrorCode::StoreFailure);
}
