//! Thumbnail preview overlays.
//!
//! Overlays are owned by an explicit [`OverlayRegistry`] keyed by entry
//! content hash, instead of being found back through DOM ids: removal is
//! guaranteed both on explicit close and on any navigation, which calls
//! [`hide_all`] before changing directories.

use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::Element;

use crate::app::AppContext;
use crate::config::{PHOTO_PREFIX, STATICS_PREFIX};
use crate::core::{ApiClient, HttpApiClient};
use crate::models::Entry;
use crate::utils::dom;

/// Owned mapping from content hash to the overlay element showing its
/// preview.
#[derive(Default)]
pub struct OverlayRegistry {
    overlays: HashMap<String, Element>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overlay, replacing (and detaching) any previous one
    /// for the same key.
    pub fn insert(&mut self, key: String, overlay: Element) {
        if let Some(old) = self.overlays.insert(key, overlay) {
            old.remove();
        }
    }

    /// Detach and forget the overlay for `key`.
    pub fn remove(&mut self, key: &str) {
        if let Some(overlay) = self.overlays.remove(key) {
            overlay.remove();
        }
    }

    /// Detach every overlay.
    pub fn clear(&mut self) {
        for (_, overlay) in self.overlays.drain() {
            overlay.remove();
        }
    }
}

/// Remove every open preview. Called on close, navigation and
/// up-navigation so overlays can never outlive the rows they annotate.
pub fn hide_all(ctx: AppContext) {
    ctx.overlays().borrow_mut().clear();
    ctx.preview_open.set(None);
}

/// Toggle the preview for an entry: a second activation on the same entry
/// closes it, anything else replaces the open preview.
pub fn toggle(ctx: AppContext, entry: &Entry) {
    if ctx.preview_open.get_untracked().as_deref() == Some(entry.path.as_str()) {
        hide_all(ctx);
        return;
    }
    ctx.overlays().borrow_mut().clear();
    ctx.preview_open.set(Some(entry.path.clone()));
    show(ctx, entry.clone());
}

fn show(ctx: AppContext, entry: Entry) {
    if entry.is_image {
        let src = encode_uri(&format!("{}{}", STATICS_PREFIX, entry.path));
        let width = dom::viewport_width() / 2;
        place_overlay(ctx, &entry, &src, Some(width), None);
        return;
    }
    if !entry.is_dir {
        return;
    }

    // Directory preview: ask the backend for a representative thumbnail,
    // memoized per content hash with single-flight coalescing.
    wasm_bindgen_futures::spawn_local(async move {
        let thumbs = ctx.thumbs();
        let path = entry.path.clone();
        let result = thumbs
            .get(&entry.hash, move || async move {
                HttpApiClient.thumbnail(&path).await
            })
            .await;
        match result {
            Ok(Some(thumb)) => {
                let half = dom::viewport_width() / 2;
                let (width, height) = if thumb.width > 0 && thumb.width > half {
                    // Scale down proportionally to half the viewport.
                    let height = (half as f64 / thumb.width as f64 * thumb.height as f64) as u32;
                    (Some(half), Some(height))
                } else if thumb.width > 0 {
                    (Some(thumb.width), Some(thumb.height))
                } else {
                    (None, None)
                };
                place_overlay(ctx, &entry, &thumb.path, width, height);
            }
            // No preview available: nothing to show, nothing cached.
            Ok(None) => {}
            Err(err) => ctx.report(&err),
        }
    });
}

fn place_overlay(
    ctx: AppContext,
    entry: &Entry,
    src: &str,
    width: Option<u32>,
    height: Option<u32>,
) {
    let Some(document) = dom::document() else {
        return;
    };
    // The row carries the entry hash as its id; it anchors the overlay.
    let Some(anchor) = document.get_element_by_id(&entry.hash) else {
        return;
    };
    let Ok(overlay) = document.create_element("div") else {
        return;
    };
    overlay.set_class_name("thumb1");
    let left = dom::viewport_width() / 2;
    let _ = overlay.set_attribute(
        "style",
        &format!("position:absolute;left:{}px;top:20px;z-index:1030;", left),
    );

    let Ok(img) = document.create_element("img") else {
        return;
    };
    img.set_class_name("thumbimg");
    let _ = img.set_attribute("src", src);
    if let Some(width) = width {
        let _ = img.set_attribute("width", &width.to_string());
    }
    if let Some(height) = height {
        let _ = img.set_attribute("height", &height.to_string());
    }

    // Clicking the overlay opens the full rendition in a new tab.
    let target = if entry.is_image {
        encode_uri(&format!("{}{}", STATICS_PREFIX, entry.path))
    } else {
        encode_uri(&format!("{}{}", PHOTO_PREFIX, entry.path))
    };
    let open = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Some(window) = dom::window() {
            let _ = window.open_with_url(&target);
        }
    }));
    let _ = overlay.add_event_listener_with_callback("click", open.as_ref().unchecked_ref());
    open.forget();

    let _ = overlay.append_child(&img);
    let _ = anchor.append_child(&overlay);
    ctx.overlays().borrow_mut().insert(entry.hash.clone(), overlay);
}

fn encode_uri(raw: &str) -> String {
    js_sys::encode_uri(raw)
        .as_string()
        .unwrap_or_else(|| raw.to_string())
}
