use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    CandidateMember, MemberDetail, MemberWorkload, MembershipService, ProjectConstraints,
    RosterFilter, RosterProvider, RosterSnapshot, SelectionChange, StaffingReport, TeamPlanner,
    fetch_or_empty, inspect,
};

/// Mutable planner data shared by all handlers.
pub struct PlannerState {
    pub planner: TeamPlanner,
    pub roster: RosterSnapshot,
    pub workloads: HashMap<String, MemberWorkload>,
}

impl PlannerState {
    pub fn new(planner: TeamPlanner, roster: RosterSnapshot) -> Self {
        Self {
            planner,
            roster,
            workloads: HashMap::new(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    state: Arc<RwLock<PlannerState>>,
    membership: Arc<dyn MembershipService>,
    roster_provider: Option<Arc<dyn RosterProvider>>,
}

impl AppState {
    pub fn new(state: PlannerState, membership: Arc<dyn MembershipService>) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            membership,
            roster_provider: None,
        }
    }

    pub fn with_roster_provider(mut self, provider: Arc<dyn RosterProvider>) -> Self {
        self.roster_provider = Some(provider);
        self
    }

    fn state(&self) -> Arc<RwLock<PlannerState>> {
        self.state.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddMemberPayload {
    member_id: String,
}

#[derive(Debug, Serialize)]
struct SelectionResponse {
    change: &'static str,
    members: Vec<CandidateMember>,
    /// Present when the membership service rejected the change. The local
    /// selection keeps the change regardless.
    #[serde(skip_serializing_if = "Option::is_none")]
    sync_error: Option<String>,
}

fn change_label(change: &SelectionChange) -> &'static str {
    match change {
        SelectionChange::Added(_) => "added",
        SelectionChange::AlreadyPresent => "already_present",
        SelectionChange::Removed(_) => "removed",
        SelectionChange::NotPresent => "not_present",
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/roster", get(get_roster))
        .route("/roster/refresh", post(refresh_roster))
        .route("/selection", get(list_selection).post(add_member))
        .route("/selection/:id", delete(remove_member))
        .route("/report", get(get_report))
        .route("/constraints", get(get_constraints).put(update_constraints))
        .route("/members/:id", get(get_member))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "team planner HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_roster(
    State(state): State<AppState>,
    Query(filter): Query<RosterFilter>,
) -> Json<RosterSnapshot> {
    let shared = state.state();
    let snapshot = {
        let guard = shared.read();
        RosterSnapshot {
            members: filter.apply(&guard.roster.members),
            status: guard.roster.status.clone(),
        }
    };
    Json(snapshot)
}

async fn refresh_roster(
    State(state): State<AppState>,
) -> Result<Json<RosterSnapshot>, ApiError> {
    let provider = state
        .roster_provider
        .clone()
        .ok_or_else(|| ApiError::invalid("no roster provider configured"))?;
    let snapshot = fetch_or_empty(&*provider, None).await;
    let shared = state.state();
    {
        let mut guard = shared.write();
        guard.roster = snapshot.clone();
    }
    Ok(Json(snapshot))
}

async fn list_selection(State(state): State<AppState>) -> Json<Vec<CandidateMember>> {
    let shared = state.state();
    let members = {
        let guard = shared.read();
        guard.planner.selection().list().to_vec()
    };
    Json(members)
}

async fn add_member(
    State(state): State<AppState>,
    Json(payload): Json<AddMemberPayload>,
) -> Result<(StatusCode, Json<SelectionResponse>), ApiError> {
    let shared = state.state();
    let (change, project_id, members) = {
        let mut guard = shared.write();
        let member = guard
            .roster
            .find(&payload.member_id)
            .cloned()
            .ok_or_else(|| {
                ApiError::not_found(format!("member {} not in roster", payload.member_id))
            })?;
        let change = guard.planner.click(member);
        (
            change,
            guard.planner.project_id().to_string(),
            guard.planner.selection().list().to_vec(),
        )
    };

    let sync_error =
        crate::membership::sync_change(&*state.membership, &project_id, &change)
            .await
            .err()
            .map(|err| err.to_string());

    let status = if matches!(change, SelectionChange::Added(_)) {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(SelectionResponse {
            change: change_label(&change),
            members,
            sync_error,
        }),
    ))
}

async fn remove_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Json<SelectionResponse> {
    let shared = state.state();
    let (change, project_id, members) = {
        let mut guard = shared.write();
        let change = guard.planner.remove(&member_id);
        (
            change,
            guard.planner.project_id().to_string(),
            guard.planner.selection().list().to_vec(),
        )
    };

    let sync_error =
        crate::membership::sync_change(&*state.membership, &project_id, &change)
            .await
            .err()
            .map(|err| err.to_string());

    Json(SelectionResponse {
        change: change_label(&change),
        members,
        sync_error,
    })
}

async fn get_report(State(state): State<AppState>) -> Json<StaffingReport> {
    let shared = state.state();
    let report = {
        let guard = shared.read();
        guard.planner.report()
    };
    Json(report)
}

async fn get_constraints(State(state): State<AppState>) -> Json<ProjectConstraints> {
    let shared = state.state();
    let constraints = {
        let guard = shared.read();
        guard.planner.constraints().clone()
    };
    Json(constraints)
}

async fn update_constraints(
    State(state): State<AppState>,
    Json(constraints): Json<ProjectConstraints>,
) -> Result<Json<StaffingReport>, ApiError> {
    constraints.validate().map_err(ApiError::invalid)?;
    let shared = state.state();
    let report = {
        let mut guard = shared.write();
        guard.planner.set_constraints(constraints);
        guard.planner.report()
    };
    Ok(Json(report))
}

async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberDetail>, ApiError> {
    let shared = state.state();
    let detail = {
        let guard = shared.read();
        inspect(
            &member_id,
            &guard.roster.members,
            guard.planner.selection(),
            &guard.workloads,
        )
    };
    detail
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("member {member_id} not found")))
}
