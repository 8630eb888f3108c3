//! Change-notification channels for registry observers.
//!
//! # Responsibility
//! - Give the presentation layer an explicit subscribe mechanism in place of
//!   framework-bound reactivity.
//!
//! # Invariants
//! - Events are emitted after the mutation they describe is fully applied.
//! - A dropped subscriber never blocks or fails an emit; dead channels are
//!   pruned on the next emit.

use crate::model::issue::{CommentId, IssueId};
use crate::model::sheet::SheetId;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Change notification for the issue registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueEvent {
    Created(IssueId),
    Updated(IssueId),
    Deleted(IssueId),
    SelectionChanged(Option<IssueId>),
    CommentAdded {
        issue_id: IssueId,
        comment_id: CommentId,
    },
    FilterReplaced,
}

/// Change notification for the sheet registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    Added(SheetId),
    Deleted(SheetId),
    CurrentChanged(Option<SheetId>),
}

/// Fan-out sender collection backing registry subscriptions.
pub struct EventBus<E> {
    subscribers: Vec<Sender<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<E: Clone> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one observer and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<E> {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Delivers one event to every live subscriber, pruning dead ones.
    pub fn emit(&mut self, event: E) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    /// Returns the number of registered subscribers (dead ones included
    /// until the next emit).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
