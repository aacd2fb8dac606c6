#![cfg(feature = "sqlite")]

use team_planner::{
    CandidateMember, ExperienceTier, MembershipError, MembershipService, ProjectConstraints, Role,
    SqliteMembershipStore, TeamPlanner,
};
use tempfile::NamedTempFile;

#[tokio::test]
async fn sqlite_store_tracks_project_membership() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteMembershipStore::new(file.path()).unwrap();

    store
        .add_member("apollo", "u-1", Role::Manager, true)
        .await
        .expect("add manager");
    store
        .add_member("apollo", "u-2", Role::Developer, false)
        .await
        .expect("add developer");
    store
        .add_member("gemini", "u-2", Role::Developer, false)
        .await
        .expect("add to other project");

    let members = store.members("apollo").unwrap();
    assert_eq!(members.len(), 2);
    let manager = members.iter().find(|m| m.user_id == "u-1").unwrap();
    assert_eq!(manager.role, Role::Manager);
    assert!(manager.is_team_lead);

    store.remove_member("apollo", "u-2").await.unwrap();
    assert_eq!(store.members("apollo").unwrap().len(), 1);
    assert_eq!(store.members("gemini").unwrap().len(), 1);

    let err = store.remove_member("apollo", "u-2").await.unwrap_err();
    assert!(matches!(err, MembershipError::NotMember { .. }));
}

#[tokio::test]
async fn re_adding_updates_role_without_duplicating() {
    let store = SqliteMembershipStore::in_memory().unwrap();
    store
        .add_member("apollo", "u-1", Role::Developer, false)
        .await
        .unwrap();
    store
        .add_member("apollo", "u-1", Role::Devops, true)
        .await
        .unwrap();
    let members = store.members("apollo").unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].role, Role::Devops);
    assert!(members[0].is_team_lead);
}

#[tokio::test]
async fn planner_changes_persist_through_sqlite_store() {
    let store = SqliteMembershipStore::in_memory().unwrap();
    let mut planner = TeamPlanner::new("apollo", ProjectConstraints::default());
    let member = CandidateMember::new("u-7", "Rae", Role::Tester, ExperienceTier::Senior, 70.0);

    let change = planner.add(member);
    planner.sync_change(&store, &change).await.unwrap();
    assert_eq!(store.members("apollo").unwrap()[0].user_id, "u-7");

    let change = planner.remove("u-7");
    planner.sync_change(&store, &change).await.unwrap();
    assert!(store.members("apollo").unwrap().is_empty());
}
