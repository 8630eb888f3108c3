//! Issue use-case service.
//!
//! # Responsibility
//! - Provide the command/query API the presentation layer calls for issues.
//! - Serialize all mutations through one shared lock, making "exactly one
//!   writer at a time" explicit even without concurrent writers.
//!
//! # Invariants
//! - Service APIs never bypass registry validation or error semantics.
//! - Query results are snapshots; holding them never blocks a writer.

use crate::events::IssueEvent;
use crate::model::filter::IssueFilter;
use crate::model::issue::{CommentId, Issue, IssueId, IssuePatch, NewIssue};
use crate::model::sheet::SheetId;
use crate::registry::{IssueRegistry, RegistryError, RegistryResult};
use log::{info, warn};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to the process-wide issue registry.
#[derive(Clone, Default)]
pub struct IssueService {
    registry: Arc<Mutex<IssueRegistry>>,
}

impl IssueService {
    /// Creates a service owning a fresh, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service over an existing shared registry.
    pub fn with_registry(registry: Arc<Mutex<IssueRegistry>>) -> Self {
        Self { registry }
    }

    /// Registers an observer for issue change events.
    pub fn subscribe(&self) -> RegistryResult<Receiver<IssueEvent>> {
        Ok(self.lock()?.subscribe())
    }

    /// Creates one issue from a draft.
    pub fn create(&self, draft: NewIssue) -> RegistryResult<IssueId> {
        match self.lock()?.create(draft) {
            Ok(id) => {
                info!("event=issue_created module=core status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                warn!("event=issue_created module=core status=error reason={err}");
                Err(err)
            }
        }
    }

    /// Merges a partial update into one issue.
    pub fn update(&self, id: IssueId, patch: IssuePatch) -> RegistryResult<()> {
        match self.lock()?.update(id, patch) {
            Ok(()) => {
                info!("event=issue_updated module=core status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=issue_updated module=core status=error id={id} reason={err}");
                Err(err)
            }
        }
    }

    /// Sets or clears the selection.
    pub fn select(&self, id: Option<IssueId>) -> RegistryResult<()> {
        self.lock()?.select(id)
    }

    /// Removes one issue, clearing the selection when it was selected.
    pub fn delete(&self, id: IssueId) -> RegistryResult<()> {
        match self.lock()?.delete(id) {
            Ok(()) => {
                info!("event=issue_deleted module=core status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=issue_deleted module=core status=error id={id} reason={err}");
                Err(err)
            }
        }
    }

    /// Appends one comment to an issue's thread.
    pub fn add_comment(
        &self,
        issue_id: IssueId,
        content: &str,
        author: &str,
    ) -> RegistryResult<CommentId> {
        match self.lock()?.add_comment(issue_id, content, author) {
            Ok(comment_id) => {
                info!(
                    "event=comment_added module=core status=ok issue={issue_id} comment={comment_id}"
                );
                Ok(comment_id)
            }
            Err(err) => {
                warn!("event=comment_added module=core status=error issue={issue_id} reason={err}");
                Err(err)
            }
        }
    }

    /// Appends one tag to an issue, skipping blanks and duplicates.
    pub fn add_tag(&self, issue_id: IssueId, tag: &str) -> RegistryResult<()> {
        self.lock()?.add_tag(issue_id, tag)
    }

    /// Replaces the active filter wholesale.
    pub fn set_filter(&self, filter: IssueFilter) -> RegistryResult<()> {
        self.lock()?.set_filter(filter);
        Ok(())
    }

    /// Returns the active filter.
    pub fn filter(&self) -> RegistryResult<IssueFilter> {
        Ok(self.lock()?.filter().clone())
    }

    /// Returns a snapshot of the full issue list, in insertion order.
    pub fn list(&self) -> RegistryResult<Vec<Issue>> {
        Ok(self.lock()?.list().to_vec())
    }

    /// Returns a snapshot of the issues matching the active filter.
    pub fn list_filtered(&self) -> RegistryResult<Vec<Issue>> {
        Ok(self.lock()?.list_filtered())
    }

    /// Returns one issue by id.
    pub fn get(&self, id: IssueId) -> RegistryResult<Option<Issue>> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// Returns the selected issue id.
    pub fn selected_id(&self) -> RegistryResult<Option<IssueId>> {
        Ok(self.lock()?.selected_id())
    }

    /// Resolves the selected issue against the stored list.
    pub fn selected_issue(&self) -> RegistryResult<Option<Issue>> {
        Ok(self.lock()?.selected_issue().cloned())
    }

    /// Returns the issues anchored to one sheet page.
    pub fn issues_on_page(
        &self,
        pdf_id: SheetId,
        page_number: u32,
    ) -> RegistryResult<Vec<Issue>> {
        Ok(self.lock()?.issues_on_page(pdf_id, page_number))
    }

    /// Returns every distinct tag across all issues, sorted by name.
    pub fn known_tags(&self) -> RegistryResult<Vec<String>> {
        Ok(self.lock()?.known_tags())
    }

    fn lock(&self) -> RegistryResult<MutexGuard<'_, IssueRegistry>> {
        self.registry.lock().map_err(|_| RegistryError::Poisoned)
    }
}
