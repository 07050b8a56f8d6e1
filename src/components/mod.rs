//! UI components built with Leptos.
//!
//! - [`browser`] - The file browser view layer

pub mod browser;

pub use browser::Browser;
