use crate::member::CandidateMember;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller-supplied workload figures shown next to a member profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberWorkload {
    pub active_projects: u32,
    /// Share of capacity already committed elsewhere, 0-100.
    pub allocated_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberDetail {
    pub member: CandidateMember,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<MemberWorkload>,
}

/// Looks up a member by id, preferring the roster and falling back to the
/// selection. Returns `None` when the member has vanished from both.
pub fn inspect(
    id: &str,
    roster: &[CandidateMember],
    selection: &Selection,
    workloads: &HashMap<String, MemberWorkload>,
) -> Option<MemberDetail> {
    let member = roster
        .iter()
        .find(|member| member.id == id)
        .or_else(|| selection.get(id))?
        .clone();
    Some(MemberDetail {
        selected: selection.contains(id),
        workload: workloads.get(id).cloned(),
        member,
    })
}

/// Visibility and target of the member detail dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailInspector {
    target: Option<String>,
}

impl DetailInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, id: impl Into<String>) {
        self.target = Some(id.into());
    }

    pub fn close(&mut self) {
        self.target = None;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Resolves the open target. An open dialog whose member disappeared
    /// resolves to `None` and stays open until closed.
    pub fn current(
        &self,
        roster: &[CandidateMember],
        selection: &Selection,
        workloads: &HashMap<String, MemberWorkload>,
    ) -> Option<MemberDetail> {
        let id = self.target.as_deref()?;
        inspect(id, roster, selection, workloads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{ExperienceTier, Role};

    fn member(id: &str) -> CandidateMember {
        CandidateMember::new(id, "Lin", Role::Analyst, ExperienceTier::Senior, 65.0)
    }

    #[test]
    fn open_and_close_are_idempotent_and_side_effect_free() {
        let roster = vec![member("a")];
        let mut selection = Selection::new();
        selection.add(member("a"));
        let before = selection.clone();
        let mut inspector = DetailInspector::new();

        inspector.open("a");
        inspector.open("a");
        let detail = inspector
            .current(&roster, &selection, &HashMap::new())
            .expect("member present");
        assert!(detail.selected);
        assert_eq!(detail.member.id, "a");

        inspector.close();
        inspector.close();
        assert!(!inspector.is_open());
        assert_eq!(selection, before);
    }

    #[test]
    fn vanished_member_is_not_found() {
        let mut inspector = DetailInspector::new();
        inspector.open("gone");
        assert!(inspector.is_open());
        assert_eq!(
            inspector.current(&[], &Selection::new(), &HashMap::new()),
            None
        );
    }

    #[test]
    fn selected_member_outlives_roster_refresh() {
        let mut selection = Selection::new();
        selection.add(member("a"));
        let mut workloads = HashMap::new();
        workloads.insert(
            "a".to_string(),
            MemberWorkload {
                active_projects: 2,
                allocated_percent: 60.0,
            },
        );
        let detail = inspect("a", &[], &selection, &workloads).unwrap();
        assert_eq!(detail.workload.map(|w| w.active_projects), Some(2));
    }
}
