//! Issue filter predicate.
//!
//! # Responsibility
//! - Define the value object restricting the displayed issue list.
//!
//! # Invariants
//! - Undefined fields impose no constraint; the empty filter matches every
//!   issue.
//! - `tags` uses superset semantics: an issue matches only when ALL filter
//!   tags appear in its tag list.
//! - Filters are replaced wholesale, never patched incrementally.

use crate::model::issue::{Issue, IssueKind, IssuePriority, IssueStatus};
use serde::{Deserialize, Serialize};

/// Predicate over issue fields restricting the displayed list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueFilter {
    /// Exact-match workflow state.
    pub status: Option<IssueStatus>,
    /// Exact-match urgency.
    pub priority: Option<IssuePriority>,
    /// Exact-match category.
    #[serde(rename = "type")]
    pub kind: Option<IssueKind>,
    /// Exact-match assignee; an unassigned issue never matches a set value.
    pub assigned_to: Option<String>,
    /// Required tag superset; empty means unconstrained.
    pub tags: Vec<String>,
}

impl IssueFilter {
    /// Returns whether this filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.kind.is_none()
            && self.assigned_to.is_none()
            && self.tags.is_empty()
    }

    /// Evaluates the predicate against one issue.
    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(status) = self.status {
            if issue.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if issue.priority != priority {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if issue.kind != kind {
                return false;
            }
        }
        if let Some(assigned_to) = self.assigned_to.as_deref() {
            if issue.assigned_to.as_deref() != Some(assigned_to) {
                return false;
            }
        }
        self.tags
            .iter()
            .all(|tag| issue.tags.iter().any(|have| have == tag))
    }
}
