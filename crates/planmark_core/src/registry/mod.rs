//! In-memory state owners for issues and sheets.
//!
//! # Responsibility
//! - Own all mutable annotation state behind explicit command APIs.
//! - Return semantic errors (`IssueNotFound`, `SheetNotFound`) instead of
//!   panicking or silently corrupting state.
//!
//! # Invariants
//! - Every command either applies fully or leaves the registry unchanged.
//! - Selection/current pointers always refer to a present record; deletion
//!   clears them in the same operation.
//! - Creation stamps are non-decreasing with insertion order per registry.

use crate::model::issue::{IssueId, IssueValidationError};
use crate::model::sheet::SheetId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod issue_registry;
pub mod sheet_registry;

pub use issue_registry::IssueRegistry;
pub use sheet_registry::SheetRegistry;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry command failures.
///
/// None of these are fatal; the registry state is unchanged on every error.
#[derive(Debug)]
pub enum RegistryError {
    /// The referenced issue is not in the registry.
    IssueNotFound(IssueId),
    /// The referenced sheet is not in the registry.
    SheetNotFound(SheetId),
    /// Comment content was empty after trimming.
    EmptyComment,
    /// A record failed model validation.
    Validation(IssueValidationError),
    /// A registry lock was poisoned by a panicking writer.
    Poisoned,
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IssueNotFound(id) => write!(f, "issue not found: {id}"),
            Self::SheetNotFound(id) => write!(f, "sheet not found: {id}"),
            Self::EmptyComment => write!(f, "comment content is empty after trimming"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Poisoned => write!(f, "registry lock poisoned"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IssueValidationError> for RegistryError {
    fn from(value: IssueValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Current wall clock in Unix epoch milliseconds.
///
/// A clock before the epoch degrades to 0; registries additionally clamp
/// stamps monotonic, so ordering invariants never depend on this value
/// alone.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
