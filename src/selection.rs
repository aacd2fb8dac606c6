use crate::member::CandidateMember;
use serde::Serialize;
use std::collections::HashSet;

/// Result of a selection mutation. The no-op variants are not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    Added(CandidateMember),
    AlreadyPresent,
    Removed(CandidateMember),
    NotPresent,
}

impl SelectionChange {
    pub fn is_mutation(&self) -> bool {
        matches!(self, SelectionChange::Added(_) | SelectionChange::Removed(_))
    }
}

/// Ordered set of chosen members, unique by id.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Selection {
    members: Vec<CandidateMember>,
    #[serde(skip)]
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, member: CandidateMember) -> SelectionChange {
        if !self.ids.insert(member.id.clone()) {
            tracing::debug!(member_id = %member.id, "member already selected");
            return SelectionChange::AlreadyPresent;
        }
        tracing::debug!(member_id = %member.id, role = %member.role, "member selected");
        self.members.push(member.clone());
        SelectionChange::Added(member)
    }

    pub fn remove(&mut self, id: &str) -> SelectionChange {
        if !self.ids.remove(id) {
            return SelectionChange::NotPresent;
        }
        match self.members.iter().position(|member| member.id == id) {
            Some(idx) => {
                tracing::debug!(member_id = %id, "member deselected");
                SelectionChange::Removed(self.members.remove(idx))
            }
            None => SelectionChange::NotPresent,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&CandidateMember> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn list(&self) -> &[CandidateMember] {
        &self.members
    }

    pub fn ids(&self) -> Vec<&str> {
        self.members.iter().map(|member| member.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.ids.clear();
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}
