//! Sheet domain model.
//!
//! # Responsibility
//! - Define the uploaded-document record issues anchor to.
//!
//! # Invariants
//! - `id` is stable and never reused for another sheet.
//! - Records are immutable after creation; there is no sheet update path.
//! - `content_ref` is opaque to the core; the bytes it points at are owned
//!   and parsed by the rendering collaborator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an uploaded sheet.
pub type SheetId = Uuid;

/// One uploaded document available for viewing and annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    /// Stable sheet ID.
    pub id: SheetId,
    /// Display label, typically the original filename.
    pub name: String,
    /// Opaque URI valid for the process lifetime.
    pub content_ref: String,
    /// Unix epoch milliseconds, stamped once at upload.
    pub uploaded_at: i64,
}
