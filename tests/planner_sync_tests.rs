use team_planner::{
    CandidateMember, DropOutcome, ExperienceTier, InMemoryMembershipService, MembershipError,
    ProjectConstraints, Role, SelectionChange, TeamPlanner,
};

fn member(id: &str, role: Role) -> CandidateMember {
    CandidateMember::new(id, id, role, ExperienceTier::Mid, 75.0)
}

#[tokio::test]
async fn rejected_add_keeps_local_selection() {
    let service = InMemoryMembershipService::new();
    service.reject_all("project archived");
    let mut planner = TeamPlanner::new("p1", ProjectConstraints::default());

    let change = planner.click(member("a", Role::Developer));
    let result = planner.sync_change(&service, &change).await;

    assert!(matches!(result, Err(MembershipError::Rejected(_))));
    assert!(planner.selection().contains("a"));
    assert_eq!(planner.analysis().team_size, 1);
    assert!(service.members("p1").is_empty());
}

#[tokio::test]
async fn confirmed_drop_is_recorded_remotely() {
    let service = InMemoryMembershipService::new();
    let mut planner = TeamPlanner::new("p1", ProjectConstraints::default());

    planner.start_drag(member("qa", Role::Tester));
    planner.enter_drop_target();
    let outcome = planner.release_drag(true);
    let DropOutcome::Added(added) = outcome else {
        panic!("expected drop to add member");
    };

    planner
        .sync_change(&service, &SelectionChange::Added(added))
        .await
        .unwrap();
    let records = service.members("p1");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].role, Role::Tester);
}

#[tokio::test]
async fn cancelled_drag_triggers_no_remote_call() {
    let service = InMemoryMembershipService::new();
    let mut planner = TeamPlanner::new("p1", ProjectConstraints::default());

    planner.start_drag(member("a", Role::Designer));
    let outcome = planner.release_drag(false);
    assert!(matches!(outcome, DropOutcome::Cancelled(_)));
    assert!(planner.selection().is_empty());

    let change = planner.remove("a");
    assert_eq!(change, SelectionChange::NotPresent);
    planner.sync_change(&service, &change).await.unwrap();
    assert!(service.members("p1").is_empty());
}
