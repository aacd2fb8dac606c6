#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use team_planner::http_api::{AppState, PlannerState};
    use team_planner::{
        AnalysisPolicy, FileRoster, InMemoryMembershipService, ProjectConstraints, RosterSnapshot,
        TeamPlanner, fetch_or_empty, load_policy, telemetry,
    };

    telemetry::init_telemetry();

    let addr: SocketAddr = std::env::var("TEAM_PLANNER_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;
    let policy = match std::env::var("TEAM_PLANNER_POLICY") {
        Ok(path) => load_policy(path)?,
        Err(_) => AnalysisPolicy::default(),
    };
    let project_id =
        std::env::var("TEAM_PLANNER_PROJECT").unwrap_or_else(|_| "default".to_string());

    let provider = std::env::var("TEAM_PLANNER_ROSTER")
        .ok()
        .map(|path| Arc::new(FileRoster::from_path(path)));
    let roster = match provider.as_deref() {
        Some(provider) => fetch_or_empty(provider, None).await,
        None => RosterSnapshot::loaded(Vec::new()),
    };

    let planner = TeamPlanner::with_policy(project_id, ProjectConstraints::default(), policy);
    let mut state = AppState::new(
        PlannerState::new(planner, roster),
        Arc::new(InMemoryMembershipService::new()),
    );
    if let Some(provider) = provider {
        state = state.with_roster_provider(provider);
    }

    println!("team-planner HTTP API listening on http://{addr}");
    team_planner::http_api::serve(addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
