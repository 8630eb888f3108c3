//! Sheet registry: the single owner of sheet state.
//!
//! # Responsibility
//! - Own the ordered sheet list and the current-sheet pointer.
//! - Apply add/select/delete commands atomically.
//!
//! # Invariants
//! - Sheets are immutable after creation; there is no update command.
//! - The current pointer is stored as an id and resolved by lookup at read
//!   time; deleting the current sheet clears it in the same command.
//! - `uploaded_at` stamps are non-decreasing with insertion order.

use crate::events::{EventBus, SheetEvent};
use crate::model::sheet::{Sheet, SheetId};
use crate::registry::{now_epoch_ms, RegistryError, RegistryResult};
use std::sync::mpsc::Receiver;
use uuid::Uuid;

/// In-memory sheet state owner.
#[derive(Default)]
pub struct SheetRegistry {
    sheets: Vec<Sheet>,
    current: Option<SheetId>,
    last_stamp_ms: i64,
    events: EventBus<SheetEvent>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for sheet change events.
    pub fn subscribe(&mut self) -> Receiver<SheetEvent> {
        self.events.subscribe()
    }

    /// Creates one sheet with a fresh id and upload stamp and appends it.
    pub fn add_sheet(&mut self, name: impl Into<String>, content_ref: impl Into<String>) -> SheetId {
        let sheet = Sheet {
            id: Uuid::new_v4(),
            name: name.into(),
            content_ref: content_ref.into(),
            uploaded_at: self.next_stamp(),
        };
        let id = sheet.id;
        self.sheets.push(sheet);
        self.events.emit(SheetEvent::Added(id));
        id
    }

    /// Sets or clears which sheet is active for viewing.
    ///
    /// # Errors
    /// - `SheetNotFound` when `Some(id)` refers to an absent sheet; the
    ///   previous pointer is kept.
    pub fn set_current(&mut self, id: Option<SheetId>) -> RegistryResult<()> {
        if let Some(id) = id {
            if self.index_of(id).is_none() {
                return Err(RegistryError::SheetNotFound(id));
            }
        }
        if self.current != id {
            self.current = id;
            self.events.emit(SheetEvent::CurrentChanged(id));
        }
        Ok(())
    }

    /// Removes one sheet.
    ///
    /// When the removed sheet was current, the pointer is cleared in the
    /// same command; deleting any other sheet leaves it unchanged.
    ///
    /// # Errors
    /// - `SheetNotFound` when `id` is absent.
    pub fn delete(&mut self, id: SheetId) -> RegistryResult<()> {
        let index = self
            .index_of(id)
            .ok_or(RegistryError::SheetNotFound(id))?;

        self.sheets.remove(index);
        let cleared_current = self.current == Some(id);
        if cleared_current {
            self.current = None;
        }

        self.events.emit(SheetEvent::Deleted(id));
        if cleared_current {
            self.events.emit(SheetEvent::CurrentChanged(None));
        }
        Ok(())
    }

    /// Returns the full sheet list in upload order.
    pub fn list(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Returns one sheet by id.
    pub fn get(&self, id: SheetId) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.id == id)
    }

    /// Returns the current sheet id.
    pub fn current_id(&self) -> Option<SheetId> {
        self.current
    }

    /// Resolves the current sheet against the stored list.
    pub fn current_sheet(&self) -> Option<&Sheet> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    fn index_of(&self, id: SheetId) -> Option<usize> {
        self.sheets.iter().position(|sheet| sheet.id == id)
    }

    fn next_stamp(&mut self) -> i64 {
        self.last_stamp_ms = now_epoch_ms().max(self.last_stamp_ms);
        self.last_stamp_ms
    }
}
