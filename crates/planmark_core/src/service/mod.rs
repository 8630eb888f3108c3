//! Core use-case services.
//!
//! # Responsibility
//! - Guard each registry behind a single shared mutation entry point.
//! - Emit stable structured log events for every applied command.
//! - Keep presentation layers decoupled from registry internals.

pub mod issue_service;
pub mod sheet_service;
