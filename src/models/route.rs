//! Path-based routing: the URL path is the remote directory path.
//!
//! Unlike hash routing, the served path *is* the browsed path, so the
//! route is just a decoded directory path plus the optional query
//! parameters the page honors on load (`q` scroll-to target, `search`
//! initial filter).

use crate::utils::query;

/// Parsed browser location for the file browser.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    /// Decoded directory path ("/" at the root).
    pub path: String,
    /// `q` query parameter: entry name fragment to scroll to and highlight.
    pub jump_to: Option<String>,
    /// `search` query parameter: initial substring filter.
    pub search: Option<String>,
}

impl Route {
    /// Parse a pathname + query string into a route.
    pub fn parse(pathname: &str, search: &str) -> Self {
        let path = if pathname.is_empty() {
            "/".to_string()
        } else {
            pathname.to_string()
        };
        Self {
            path,
            jump_to: query::get_param(search, "q"),
            search: query::get_param(search, "search"),
        }
    }

    /// Read the current route from the browser location.
    pub fn current() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let location = window.location();
        let pathname = location
            .pathname()
            .ok()
            .and_then(|p| js_sys::decode_uri(&p).ok())
            .map(String::from)
            .unwrap_or_else(|| "/".to_string());
        let search = location.search().unwrap_or_default();
        Self::parse(&pathname, &search)
    }
}
