//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error
//! handling. Everything here is best-effort: a missing window or element
//! degrades to a no-op rather than an error, because none of these calls
//! affect client state.

use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the document object.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Log an error to the browser console.
pub fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Viewport width in CSS pixels (0 when unavailable).
pub fn viewport_width() -> u32 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .map(|w| w as u32)
        .unwrap_or(0)
}

/// Scroll the window so the element with `id` is at the top of the view.
///
/// Silently does nothing if the element does not exist; the scroll anchor
/// is an entry content hash that may refer to a filtered-out row.
pub fn scroll_to_element(id: &str) {
    if let Some(document) = document()
        && let Some(element) = document.get_element_by_id(id)
        && let Some(window) = window()
    {
        let top = element.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0);
        window.scroll_to_with_x_and_y(0.0, top);
    }
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Push a directory path as the visible location (native back/forward).
pub fn push_location(path: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// Replace one query parameter in the visible URL without adding a
/// history entry. Used to keep `?search=` in sync while filtering.
pub fn replace_query_param(name: &str, value: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let search = window.location().search().unwrap_or_default();
        let updated = super::query::set_param(&search, name, value);
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&updated));
    }
}
