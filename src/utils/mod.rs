//! Utility modules for web, DOM, and formatting operations.
//!
//! Provides:
//! - [`fetch_json`], [`post_json`] - Network fetching with timeout
//! - [`query`] - Query-string read/update helpers
//! - [`dom`] - Best-effort browser API access
//! - [`format`] - Display formatting

pub mod dom;
mod fetch;
pub mod format;
pub mod query;

pub use fetch::{RaceResult, fetch_json, post_json, race_with_timeout};
