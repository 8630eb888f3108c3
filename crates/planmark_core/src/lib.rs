//! Core domain logic for Planmark plan annotation.
//! This crate is the single source of truth for annotation business
//! invariants.

pub mod events;
pub mod logging;
pub mod model;
pub mod placement;
pub mod registry;
pub mod render;
pub mod service;

pub use events::{EventBus, IssueEvent, SheetEvent};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::IssueFilter;
pub use model::issue::{
    normalize_tag, normalize_tags, Comment, CommentId, Issue, IssueId, IssueKind, IssuePatch,
    IssuePriority, IssueStatus, IssueValidationError, NewIssue,
};
pub use model::sheet::{Sheet, SheetId};
pub use placement::{
    marker_offset, normalize_click, MarkerPosition, PlacementError, SurfaceBounds, SurfacePoint,
};
pub use registry::{IssueRegistry, RegistryError, RegistryResult, SheetRegistry};
pub use render::{PageRenderer, RenderError};
pub use service::issue_service::IssueService;
pub use service::sheet_service::{SheetService, SheetServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
