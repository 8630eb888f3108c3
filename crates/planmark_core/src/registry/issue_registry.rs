//! Issue registry: the single owner of issue state.
//!
//! # Responsibility
//! - Own the ordered issue list, the selection pointer and the active filter.
//! - Apply create/update/select/delete/comment/tag commands atomically.
//! - Notify subscribers after every applied mutation.
//!
//! # Invariants
//! - Insertion order is display order; `list()` never reorders.
//! - The selection is stored as an id and resolved by lookup at read time,
//!   so a selected snapshot can never diverge from the stored record.
//! - Deleting the selected issue clears the selection in the same command.
//! - `created_at` stamps are non-decreasing with insertion order.

use crate::events::{EventBus, IssueEvent};
use crate::model::filter::IssueFilter;
use crate::model::issue::{
    normalize_tag, normalize_tags, Comment, CommentId, Issue, IssueId, IssuePatch, NewIssue,
};
use crate::model::sheet::SheetId;
use crate::registry::{now_epoch_ms, RegistryError, RegistryResult};
use std::collections::BTreeSet;
use std::sync::mpsc::Receiver;
use uuid::Uuid;

/// In-memory issue state owner.
#[derive(Default)]
pub struct IssueRegistry {
    issues: Vec<Issue>,
    selected: Option<IssueId>,
    filter: IssueFilter,
    last_stamp_ms: i64,
    events: EventBus<IssueEvent>,
}

impl IssueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for issue change events.
    pub fn subscribe(&mut self) -> Receiver<IssueEvent> {
        self.events.subscribe()
    }

    /// Creates one issue from a draft and appends it to the list.
    ///
    /// Assigns a fresh id and creation stamp, starts an empty comment
    /// thread, and normalizes any supplied tags.
    ///
    /// # Errors
    /// - `Validation` when the draft carries a negative cost.
    pub fn create(&mut self, draft: NewIssue) -> RegistryResult<IssueId> {
        let issue = Issue {
            id: Uuid::new_v4(),
            x: draft.x,
            y: draft.y,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            kind: draft.kind,
            assigned_to: draft.assigned_to,
            due_date: draft.due_date,
            created_at: self.peek_stamp(),
            created_by: draft.created_by,
            images: draft.images,
            comments: Vec::new(),
            pdf_id: draft.pdf_id,
            page_number: draft.page_number,
            cost: draft.cost,
            tags: normalize_tags(&draft.tags),
        };
        issue.validate()?;

        self.commit_stamp(issue.created_at);
        let id = issue.id;
        self.issues.push(issue);
        self.events.emit(IssueEvent::Created(id));
        Ok(id)
    }

    /// Merges a partial update into the stored record.
    ///
    /// The stored record is replaced only after the merged result passes
    /// validation; any error leaves it untouched. A selected issue observed
    /// after this call always reflects the merge, because selection is
    /// resolved by lookup.
    ///
    /// # Errors
    /// - `IssueNotFound` when `id` is absent.
    /// - `Validation` when the merge produces a negative cost.
    pub fn update(&mut self, id: IssueId, patch: IssuePatch) -> RegistryResult<()> {
        let index = self
            .index_of(id)
            .ok_or(RegistryError::IssueNotFound(id))?;

        let mut merged = self.issues[index].clone();
        merged.apply_patch(patch);
        merged.validate()?;

        self.issues[index] = merged;
        self.events.emit(IssueEvent::Updated(id));
        Ok(())
    }

    /// Sets or clears the selection.
    ///
    /// # Errors
    /// - `IssueNotFound` when `Some(id)` refers to an absent issue; the
    ///   previous selection is kept.
    pub fn select(&mut self, id: Option<IssueId>) -> RegistryResult<()> {
        if let Some(id) = id {
            if self.index_of(id).is_none() {
                return Err(RegistryError::IssueNotFound(id));
            }
        }
        if self.selected != id {
            self.selected = id;
            self.events.emit(IssueEvent::SelectionChanged(id));
        }
        Ok(())
    }

    /// Removes one issue.
    ///
    /// When the removed issue was selected, the selection is cleared in the
    /// same command; observers never see a dangling selection.
    ///
    /// # Errors
    /// - `IssueNotFound` when `id` is absent.
    pub fn delete(&mut self, id: IssueId) -> RegistryResult<()> {
        let index = self
            .index_of(id)
            .ok_or(RegistryError::IssueNotFound(id))?;

        self.issues.remove(index);
        let cleared_selection = self.selected == Some(id);
        if cleared_selection {
            self.selected = None;
        }

        self.events.emit(IssueEvent::Deleted(id));
        if cleared_selection {
            self.events.emit(IssueEvent::SelectionChanged(None));
        }
        Ok(())
    }

    /// Appends one comment to an issue's thread.
    ///
    /// Content is trimmed before storage; append order is chronological
    /// order.
    ///
    /// # Errors
    /// - `IssueNotFound` when `issue_id` is absent.
    /// - `EmptyComment` when the content is empty after trimming; the
    ///   thread is unchanged.
    pub fn add_comment(
        &mut self,
        issue_id: IssueId,
        content: &str,
        author: &str,
    ) -> RegistryResult<CommentId> {
        let index = self
            .index_of(issue_id)
            .ok_or(RegistryError::IssueNotFound(issue_id))?;

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::EmptyComment);
        }

        let comment = Comment {
            id: Uuid::new_v4(),
            content: trimmed.to_string(),
            created_at: self.next_stamp(),
            created_by: author.to_string(),
        };
        let comment_id = comment.id;
        self.issues[index].comments.push(comment);
        self.events.emit(IssueEvent::CommentAdded {
            issue_id,
            comment_id,
        });
        Ok(comment_id)
    }

    /// Appends one tag to an issue, skipping blanks and duplicates.
    ///
    /// # Errors
    /// - `IssueNotFound` when `issue_id` is absent.
    pub fn add_tag(&mut self, issue_id: IssueId, tag: &str) -> RegistryResult<()> {
        let index = self
            .index_of(issue_id)
            .ok_or(RegistryError::IssueNotFound(issue_id))?;

        let Some(tag) = normalize_tag(tag) else {
            return Ok(());
        };
        let issue = &mut self.issues[index];
        if issue.tags.iter().any(|have| *have == tag) {
            return Ok(());
        }
        issue.tags.push(tag);
        self.events.emit(IssueEvent::Updated(issue_id));
        Ok(())
    }

    /// Replaces the active filter wholesale, normalizing its tag list.
    pub fn set_filter(&mut self, mut filter: IssueFilter) {
        filter.tags = normalize_tags(&filter.tags);
        self.filter = filter;
        self.events.emit(IssueEvent::FilterReplaced);
    }

    /// Returns the active filter.
    pub fn filter(&self) -> &IssueFilter {
        &self.filter
    }

    /// Returns the full issue list in insertion order.
    pub fn list(&self) -> &[Issue] {
        &self.issues
    }

    /// Returns the issues matching every defined field of the active
    /// filter, in insertion order. The empty filter matches everything.
    pub fn list_filtered(&self) -> Vec<Issue> {
        self.issues
            .iter()
            .filter(|issue| self.filter.matches(issue))
            .cloned()
            .collect()
    }

    /// Returns one issue by id.
    pub fn get(&self, id: IssueId) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Returns the selected issue id.
    pub fn selected_id(&self) -> Option<IssueId> {
        self.selected
    }

    /// Resolves the selected issue against the stored list.
    pub fn selected_issue(&self) -> Option<&Issue> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Returns the issues anchored to one sheet page, in insertion order.
    pub fn issues_on_page(&self, pdf_id: SheetId, page_number: u32) -> Vec<Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.pdf_id == pdf_id && issue.page_number == page_number)
            .cloned()
            .collect()
    }

    /// Returns every distinct tag across all issues, sorted by name.
    pub fn known_tags(&self) -> Vec<String> {
        let mut tags = BTreeSet::new();
        for issue in &self.issues {
            for tag in &issue.tags {
                tags.insert(tag.clone());
            }
        }
        tags.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn index_of(&self, id: IssueId) -> Option<usize> {
        self.issues.iter().position(|issue| issue.id == id)
    }

    /// Next creation stamp without committing it, so a failed create leaves
    /// the monotonic watermark untouched.
    fn peek_stamp(&self) -> i64 {
        now_epoch_ms().max(self.last_stamp_ms)
    }

    fn commit_stamp(&mut self, stamp: i64) {
        self.last_stamp_ms = stamp;
    }

    fn next_stamp(&mut self) -> i64 {
        let stamp = self.peek_stamp();
        self.commit_stamp(stamp);
        stamp
    }
}
