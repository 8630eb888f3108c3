//! Sheet use-case service.
//!
//! # Responsibility
//! - Provide the command/query API the presentation layer calls for sheets.
//! - Own the upload-ingestion boundary: one readability check, one registry
//!   mutation, no partial sheet on failure.
//!
//! # Invariants
//! - `ingest_file` never parses or validates content bytes; it only derives
//!   an opaque content ref.
//! - An ingestion failure leaves the registry unchanged and is never retried
//!   automatically.

use crate::events::SheetEvent;
use crate::model::sheet::{Sheet, SheetId};
use crate::registry::{RegistryError, RegistryResult, SheetRegistry};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};

/// Sheet use-case failures.
#[derive(Debug)]
pub enum SheetServiceError {
    /// The content-ingestion step failed; no sheet was added.
    Upload { path: PathBuf, source: io::Error },
    /// Registry-level failure.
    Registry(RegistryError),
}

impl Display for SheetServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upload { path, source } => {
                write!(f, "failed to ingest `{}`: {source}", path.display())
            }
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SheetServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Upload { source, .. } => Some(source),
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<RegistryError> for SheetServiceError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Shared handle to the process-wide sheet registry.
#[derive(Clone, Default)]
pub struct SheetService {
    registry: Arc<Mutex<SheetRegistry>>,
}

impl SheetService {
    /// Creates a service owning a fresh, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service over an existing shared registry.
    pub fn with_registry(registry: Arc<Mutex<SheetRegistry>>) -> Self {
        Self { registry }
    }

    /// Registers an observer for sheet change events.
    pub fn subscribe(&self) -> RegistryResult<Receiver<SheetEvent>> {
        Ok(self.lock()?.subscribe())
    }

    /// Adds one sheet from an already-resolved content ref.
    pub fn add_sheet(
        &self,
        name: impl Into<String>,
        content_ref: impl Into<String>,
    ) -> RegistryResult<SheetId> {
        let id = self.lock()?.add_sheet(name, content_ref);
        info!("event=sheet_added module=core status=ok id={id}");
        Ok(id)
    }

    /// Ingests one local file as a sheet.
    ///
    /// Verifies the path refers to a readable regular file, derives a
    /// `file://` content ref from its canonical path, then performs exactly
    /// one registry mutation. The bytes are never parsed.
    ///
    /// # Errors
    /// - `Upload` when the path is missing, unreadable or not a regular
    ///   file; the registry is unchanged.
    pub fn ingest_file(&self, name: &str, path: &Path) -> Result<SheetId, SheetServiceError> {
        let resolved = check_ingestable(path).map_err(|source| {
            warn!(
                "event=sheet_ingest module=core status=error path={} reason={source}",
                path.display()
            );
            SheetServiceError::Upload {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let content_ref = format!("file://{}", resolved.display());
        let id = self.lock()?.add_sheet(name, content_ref);
        info!("event=sheet_ingest module=core status=ok id={id}");
        Ok(id)
    }

    /// Sets or clears which sheet is active for viewing.
    pub fn set_current(&self, id: Option<SheetId>) -> RegistryResult<()> {
        self.lock()?.set_current(id)
    }

    /// Removes one sheet, clearing the current pointer when it was current.
    pub fn delete(&self, id: SheetId) -> RegistryResult<()> {
        match self.lock()?.delete(id) {
            Ok(()) => {
                info!("event=sheet_deleted module=core status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=sheet_deleted module=core status=error id={id} reason={err}");
                Err(err)
            }
        }
    }

    /// Returns a snapshot of the full sheet list, in upload order.
    pub fn list(&self) -> RegistryResult<Vec<Sheet>> {
        Ok(self.lock()?.list().to_vec())
    }

    /// Returns one sheet by id.
    pub fn get(&self, id: SheetId) -> RegistryResult<Option<Sheet>> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// Returns the current sheet id.
    pub fn current_id(&self) -> RegistryResult<Option<SheetId>> {
        Ok(self.lock()?.current_id())
    }

    /// Resolves the current sheet against the stored list.
    pub fn current_sheet(&self) -> RegistryResult<Option<Sheet>> {
        Ok(self.lock()?.current_sheet().cloned())
    }

    fn lock(&self) -> RegistryResult<MutexGuard<'_, SheetRegistry>> {
        self.registry.lock().map_err(|_| RegistryError::Poisoned)
    }
}

/// Resolves a path to its canonical form after checking it is a readable
/// regular file.
fn check_ingestable(path: &Path) -> io::Result<PathBuf> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    std::fs::canonicalize(path)
}
