use crate::analysis::{self, AllocationAnalysis};
use crate::constraints::ProjectConstraints;
use crate::drag::{DragAssignCoordinator, DropOutcome};
use crate::inspector::{DetailInspector, MemberDetail, MemberWorkload};
use crate::member::CandidateMember;
use crate::membership::{self, MembershipResult, MembershipService};
use crate::policy::AnalysisPolicy;
use crate::recommendation::{self, Advisory};
use crate::selection::{Selection, SelectionChange};
use serde::Serialize;
use std::collections::HashMap;

/// Everything the analytics panel renders for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingReport {
    pub project_id: String,
    pub constraints: ProjectConstraints,
    pub members: Vec<CandidateMember>,
    pub analysis: AllocationAnalysis,
    pub advisories: Vec<Advisory>,
}

impl StaffingReport {
    pub fn to_cli_summary(&self) -> String {
        let mut out = format!("{}\n", self.analysis.to_cli_summary());
        for advisory in &self.advisories {
            out.push_str("  - ");
            out.push_str(&advisory.message());
            out.push('\n');
        }
        out
    }
}

/// Staffing state for a single project: selection, gestures, detail dialog.
#[derive(Debug)]
pub struct TeamPlanner {
    project_id: String,
    constraints: ProjectConstraints,
    policy: AnalysisPolicy,
    selection: Selection,
    coordinator: DragAssignCoordinator,
    inspector: DetailInspector,
}

impl TeamPlanner {
    pub fn new(project_id: impl Into<String>, constraints: ProjectConstraints) -> Self {
        Self::with_policy(project_id, constraints, AnalysisPolicy::default())
    }

    pub fn with_policy(
        project_id: impl Into<String>,
        constraints: ProjectConstraints,
        policy: AnalysisPolicy,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            constraints,
            policy,
            selection: Selection::new(),
            coordinator: DragAssignCoordinator::new(),
            inspector: DetailInspector::new(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn constraints(&self) -> &ProjectConstraints {
        &self.constraints
    }

    pub fn policy(&self) -> &AnalysisPolicy {
        &self.policy
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn coordinator(&self) -> &DragAssignCoordinator {
        &self.coordinator
    }

    pub fn inspector(&self) -> &DetailInspector {
        &self.inspector
    }

    pub fn set_constraints(&mut self, constraints: ProjectConstraints) {
        self.constraints = constraints;
    }

    pub fn set_budget(&mut self, budget: Option<f64>) {
        self.constraints.budget = budget;
    }

    pub fn set_duration_days(&mut self, duration_days: Option<u32>) {
        self.constraints.duration_days = duration_days;
    }

    pub fn set_policy(&mut self, policy: AnalysisPolicy) {
        self.policy = policy;
    }

    /// Moves to another project. Selection, drag session and dialog are discarded.
    pub fn switch_project(&mut self, project_id: impl Into<String>, constraints: ProjectConstraints) {
        self.project_id = project_id.into();
        self.constraints = constraints;
        self.selection.clear();
        self.coordinator.cancel();
        self.inspector.close();
        tracing::debug!(project_id = %self.project_id, "planner switched project");
    }

    pub fn add(&mut self, member: CandidateMember) -> SelectionChange {
        self.selection.add(member)
    }

    pub fn remove(&mut self, id: &str) -> SelectionChange {
        self.selection.remove(id)
    }

    pub fn click(&mut self, member: CandidateMember) -> SelectionChange {
        self.coordinator.click(member, &mut self.selection)
    }

    pub fn start_drag(&mut self, member: CandidateMember) -> Option<CandidateMember> {
        self.coordinator.start_drag(member)
    }

    pub fn enter_drop_target(&mut self) {
        self.coordinator.enter_target();
    }

    pub fn leave_drop_target(&mut self) {
        self.coordinator.leave_target();
    }

    pub fn release_drag(&mut self, over_target: bool) -> DropOutcome {
        self.coordinator.release(over_target, &mut self.selection)
    }

    pub fn drop_at_pointer(&mut self) -> DropOutcome {
        self.coordinator.drop_at_pointer(&mut self.selection)
    }

    pub fn cancel_drag(&mut self) -> Option<CandidateMember> {
        self.coordinator.cancel()
    }

    pub fn open_detail(&mut self, id: impl Into<String>) {
        self.inspector.open(id);
    }

    pub fn close_detail(&mut self) {
        self.inspector.close();
    }

    pub fn detail(
        &self,
        roster: &[CandidateMember],
        workloads: &HashMap<String, MemberWorkload>,
    ) -> Option<MemberDetail> {
        self.inspector.current(roster, &self.selection, workloads)
    }

    pub fn analysis(&self) -> AllocationAnalysis {
        analysis::analyze(self.selection.list(), &self.constraints, &self.policy)
    }

    pub fn advisories(&self) -> Vec<Advisory> {
        let analysis = self.analysis();
        recommendation::recommend(self.selection.list(), &analysis, &self.policy)
    }

    pub fn report(&self) -> StaffingReport {
        let analysis = self.analysis();
        let advisories = recommendation::recommend(self.selection.list(), &analysis, &self.policy);
        StaffingReport {
            project_id: self.project_id.clone(),
            constraints: self.constraints.clone(),
            members: self.selection.list().to_vec(),
            analysis,
            advisories,
        }
    }

    /// Propagates a local change for this project. The selection is left as is
    /// whatever the service answers.
    pub async fn sync_change<S>(&self, service: &S, change: &SelectionChange) -> MembershipResult<()>
    where
        S: MembershipService + ?Sized,
    {
        membership::sync_change(service, &self.project_id, change).await
    }
}
