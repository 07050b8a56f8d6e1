//! File browser UI components.
//!
//! Components:
//! - [`Browser`] - Top-level layout and location wiring
//! - [`header`] - Disk usage, up/search/sort controls
//! - [`pathbar`] - Breadcrumb trail
//! - [`file_list`] - Directory listing table with inline sub-listings
//! - [`actions`] - Bulk-operation panel for the selection
//! - [`preview`] - Thumbnail preview overlays
//! - [`gallery`] - Scroll-paced photo wall

mod actions;
#[allow(clippy::module_inception)]
mod browser;
mod file_list;
mod gallery;
mod header;
mod pathbar;
pub mod preview;

pub use browser::Browser;
