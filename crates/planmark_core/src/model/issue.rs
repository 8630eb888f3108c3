//! Issue domain model.
//!
//! # Responsibility
//! - Define the positioned annotation record and its closed classifications.
//! - Provide the draft and patch shapes used by create/update commands.
//! - Normalize tag input shared by the create, update and filter paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another issue.
//! - `x`/`y` are percentages of the rendered page surface, not pixels.
//! - `comments` preserves append order; appended comments are immutable.
//! - `cost`, when set, is a non-negative amount.

use crate::model::sheet::SheetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an issue record.
pub type IssueId = Uuid;

/// Stable identifier for an appended issue comment.
pub type CommentId = Uuid;

/// Workflow state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Reported and not yet picked up.
    Open,
    /// Being worked on.
    InProgress,
    /// Closed out on site.
    Resolved,
}

impl IssueStatus {
    /// Stable wire/display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }

    /// Parses a stable wire name back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

/// Urgency of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    Low,
    Medium,
    High,
}

impl IssuePriority {
    /// Stable wire/display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a stable wire name back into a priority.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Category of an issue annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Workmanship or material defect.
    Defect,
    /// General site observation.
    Observation,
    /// Request for information.
    Rfi,
    /// Safety hazard flag.
    Safety,
}

impl IssueKind {
    /// Stable wire/display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Defect => "defect",
            Self::Observation => "observation",
            Self::Rfi => "rfi",
            Self::Safety => "safety",
        }
    }

    /// Parses a stable wire name back into a kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "defect" => Some(Self::Defect),
            "observation" => Some(Self::Observation),
            "rfi" => Some(Self::Rfi),
            "safety" => Some(Self::Safety),
            _ => None,
        }
    }
}

/// One immutable comment appended to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Stable comment ID.
    pub id: CommentId,
    /// Trimmed comment body; never empty.
    pub content: String,
    /// Unix epoch milliseconds, stamped at append time.
    pub created_at: i64,
    /// Identity of the comment author, supplied by the caller.
    pub created_by: String,
}

/// A positioned annotation anchored to one sheet page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable issue ID.
    pub id: IssueId,
    /// Horizontal position as a percentage (0-100) of the page surface width.
    pub x: f64,
    /// Vertical position as a percentage (0-100) of the page surface height.
    pub y: f64,
    /// Short summary; non-empty by convention, not enforced.
    pub title: String,
    /// Longer body text; may be empty.
    pub description: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    /// Serialized as `type` to match the established record naming.
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Assignee identity, when the issue has been handed to someone.
    pub assigned_to: Option<String>,
    /// Unix epoch milliseconds.
    pub due_date: Option<i64>,
    /// Unix epoch milliseconds, stamped once at creation.
    pub created_at: i64,
    /// Identity of the creator, supplied by the caller.
    pub created_by: String,
    /// Opaque attachment URIs; byte ownership lies outside the core.
    pub images: Vec<String>,
    /// Append-only comment thread in chronological order.
    pub comments: Vec<Comment>,
    /// Sheet this issue is anchored to.
    pub pdf_id: SheetId,
    /// Page within the sheet, 1-based.
    pub page_number: u32,
    /// Estimated cost to remedy; non-negative when set.
    pub cost: Option<f64>,
    /// Normalized tag labels in first-occurrence order.
    pub tags: Vec<String>,
}

/// Model-level validation failures for issue records.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueValidationError {
    /// `cost` must be a non-negative amount.
    NegativeCost(f64),
}

impl Display for IssueValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeCost(value) => write!(f, "cost must be non-negative, got {value}"),
        }
    }
}

impl Error for IssueValidationError {}

impl Issue {
    /// Checks model invariants that creation and update must both enforce.
    ///
    /// # Errors
    /// - `NegativeCost` when `cost` is set and below zero (or not a number).
    pub fn validate(&self) -> Result<(), IssueValidationError> {
        if let Some(cost) = self.cost {
            if !(cost >= 0.0) {
                return Err(IssueValidationError::NegativeCost(cost));
            }
        }
        Ok(())
    }

    /// Merges a partial update into this record.
    ///
    /// Shallow field replacement: collections are swapped wholesale when the
    /// patch supplies a new sequence, never merged element-wise. Optional
    /// scalars use set/clear/keep semantics via nested `Option`s.
    pub fn apply_patch(&mut self, patch: IssuePatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(&tags);
        }
        if let Some(pdf_id) = patch.pdf_id {
            self.pdf_id = pdf_id;
        }
        if let Some(page_number) = patch.page_number {
            self.page_number = page_number;
        }
    }
}

/// Draft for issue creation.
///
/// Carries every caller-supplied field; id, creation stamp and the empty
/// comment thread are assigned by the registry. `tags` and `images` default
/// to empty sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub x: f64,
    pub y: f64,
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub kind: IssueKind,
    pub assigned_to: Option<String>,
    pub due_date: Option<i64>,
    pub cost: Option<f64>,
    pub created_by: String,
    pub pdf_id: SheetId,
    pub page_number: u32,
    pub images: Vec<String>,
    pub tags: Vec<String>,
}

/// Partial update for an existing issue.
///
/// `None` keeps the stored value. For clearable fields the inner `Option`
/// distinguishes `Some(Some(v))` (set) from `Some(None)` (clear).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssuePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub kind: Option<IssueKind>,
    pub assigned_to: Option<Option<String>>,
    pub due_date: Option<Option<i64>>,
    pub cost: Option<Option<f64>>,
    pub images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub pdf_id: Option<SheetId>,
    pub page_number: Option<u32>,
}

/// Normalizes one tag label.
///
/// Returns `None` for values that are empty after trimming.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes a tag sequence: trims, drops blanks, de-duplicates while
/// preserving first-occurrence order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut normalized = Vec::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            if seen.insert(value.clone()) {
                normalized.push(value);
            }
        }
    }
    normalized
}
