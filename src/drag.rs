//! Gesture handling that turns roster drags and clicks into selection adds.
//!
//! The coordinator owns a single drag session at a time. The dragged member is
//! captured by value at gesture start, so refreshing the roster mid-drag cannot
//! change what lands in the selection.

use crate::member::CandidateMember;
use crate::selection::{Selection, SelectionChange};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(CandidateMember),
    HoveringTarget(CandidateMember),
    /// Last session ended with a drop over the target.
    Dropped { member_id: String },
}

impl DragState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DragState::Idle => "idle",
            DragState::Dragging(_) => "dragging",
            DragState::HoveringTarget(_) => "hovering_target",
            DragState::Dropped { .. } => "dropped",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Added(CandidateMember),
    AlreadySelected(String),
    /// Released away from the drop surface.
    Cancelled(CandidateMember),
    /// Release without an active session.
    NoActiveDrag,
}

#[derive(Debug, Default)]
pub struct DragAssignCoordinator {
    state: DragState,
}

impl DragAssignCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.dragged().is_some()
    }

    pub fn dragged(&self) -> Option<&CandidateMember> {
        match &self.state {
            DragState::Dragging(member) | DragState::HoveringTarget(member) => Some(member),
            _ => None,
        }
    }

    /// Starts a session. An already active session is cancelled first and its
    /// member returned.
    pub fn start_drag(&mut self, member: CandidateMember) -> Option<CandidateMember> {
        let previous = self.take_active();
        if let Some(ref cancelled) = previous {
            tracing::debug!(
                cancelled = %cancelled.id,
                started = %member.id,
                "new drag replaced an active session"
            );
        }
        tracing::debug!(member_id = %member.id, "drag started");
        self.state = DragState::Dragging(member);
        previous
    }

    /// Pointer entered the drop surface. Ignored unless a drag is active.
    pub fn enter_target(&mut self) {
        if let DragState::Dragging(member) = &self.state {
            self.state = DragState::HoveringTarget(member.clone());
        }
    }

    /// Pointer left the drop surface without releasing.
    pub fn leave_target(&mut self) {
        if let DragState::HoveringTarget(member) = &self.state {
            self.state = DragState::Dragging(member.clone());
        }
    }

    /// Ends the session. Only a release over the drop surface mutates the selection.
    pub fn release(&mut self, over_target: bool, selection: &mut Selection) -> DropOutcome {
        let Some(member) = self.take_active() else {
            return DropOutcome::NoActiveDrag;
        };
        if !over_target {
            tracing::debug!(member_id = %member.id, "drag cancelled outside drop target");
            self.state = DragState::Idle;
            return DropOutcome::Cancelled(member);
        }
        self.state = DragState::Dropped {
            member_id: member.id.clone(),
        };
        match selection.add(member.clone()) {
            SelectionChange::Added(added) => DropOutcome::Added(added),
            _ => DropOutcome::AlreadySelected(member.id),
        }
    }

    /// Releases at the drop surface if the pointer is hovering it, elsewhere otherwise.
    pub fn drop_at_pointer(&mut self, selection: &mut Selection) -> DropOutcome {
        let over_target = matches!(self.state, DragState::HoveringTarget(_));
        self.release(over_target, selection)
    }

    pub fn cancel(&mut self) -> Option<CandidateMember> {
        let cancelled = self.take_active();
        self.state = DragState::Idle;
        cancelled
    }

    /// Click path: adds synchronously without touching the drag session.
    pub fn click(&self, member: CandidateMember, selection: &mut Selection) -> SelectionChange {
        selection.add(member)
    }

    fn take_active(&mut self) -> Option<CandidateMember> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(member) | DragState::HoveringTarget(member) => Some(member),
            other => {
                self.state = other;
                None
            }
        }
    }
}
