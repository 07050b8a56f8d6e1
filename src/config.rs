//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Backend Endpoints
// =============================================================================

/// API endpoint; actions are selected via the `action` query parameter.
pub const API_URL: &str = "/api";

/// Prefix under which the backend serves raw file content.
pub const STATICS_PREFIX: &str = "/statics";

/// Prefix for server-side scaled photo rendering of non-image files.
pub const PHOTO_PREFIX: &str = "/photo";

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// Interaction Configuration
// =============================================================================

/// Debounce window for single- vs. double-click disambiguation on
/// directory rows, in milliseconds. A second click inside this window
/// cancels the deferred expand/collapse and navigates instead.
pub const CLICK_DEBOUNCE_MS: u32 = 300;

/// Number of images loaded back-to-back before the lazy loader yields to
/// scroll-driven resumption.
pub const IMAGE_LOAD_BURST: usize = 5;

// =============================================================================
// Cache Configuration
// =============================================================================

/// Maximum number of resolved thumbnail descriptors kept per session;
/// least-recently-used entries are evicted beyond this.
pub const THUMB_CACHE_CAPACITY: usize = 256;

// =============================================================================
// Display Configuration
// =============================================================================

/// Bootstrap table-class suffix applied to highlighted rows (the entry
/// just clicked and the folder currently backtracked out of).
pub const HIGHLIGHT_LABEL: &str = "dark";

/// Disk-usage percentages at which the header switches to warning and
/// danger colors.
pub const DISK_WARN_PERCENT: f64 = 85.0;
pub const DISK_DANGER_PERCENT: f64 = 95.0;
