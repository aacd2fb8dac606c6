pub mod analysis;
pub mod constraints;
pub mod drag;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod inspector;
pub mod member;
pub mod member_validation;
pub mod membership;
pub mod persistence;
pub mod planner;
pub mod policy;
pub mod recommendation;
pub mod roster;
pub mod selection;
#[cfg(any(feature = "cli_api", feature = "http_api"))]
pub mod telemetry;

pub use analysis::{AllocationAnalysis, analyze};
pub use constraints::ProjectConstraints;
pub use drag::{DragAssignCoordinator, DragState, DropOutcome};
pub use inspector::{DetailInspector, MemberDetail, MemberWorkload, inspect};
pub use member::{CandidateMember, ExperienceTier, Role};
pub use member_validation::MemberValidationError;
pub use membership::{
    InMemoryMembershipService, MembershipError, MembershipRecord, MembershipResult,
    MembershipService, sync_change,
};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteMembershipStore;
pub use persistence::{
    PersistenceError, PersistenceResult, load_roster_from_csv, load_roster_from_json,
    save_roster_to_csv, save_roster_to_json,
};
pub use planner::{StaffingReport, TeamPlanner};
pub use policy::{AnalysisPolicy, PolicyError, TeamSizeTarget, load_policy};
pub use recommendation::{Advisory, recommend, recommend_messages};
pub use roster::{
    FileRoster, InMemoryRoster, RosterError, RosterFilter, RosterFormat, RosterProvider,
    RosterSnapshot, RosterStatus, fetch_or_empty,
};
pub use selection::{Selection, SelectionChange};
