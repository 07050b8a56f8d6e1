//! Root application module.
//!
//! Contains the main App component, AppContext definition, and
//! application-level setup logic following Leptos conventions.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::Browser;
use crate::components::browser::preview::OverlayRegistry;
use crate::config::{CLICK_DEBOUNCE_MS, IMAGE_LOAD_BURST, THUMB_CACHE_CAPACITY};
use crate::core::error::FetchError;
use crate::core::{
    ApiClient, BrowserHistory, HttpApiClient, LazyImageLoader, NavigationEngine, ThumbnailCache,
};
use crate::models::DiskStat;
use crate::utils::dom;

/// The production engine: HTTP backend, real browser history.
pub type Engine = NavigationEngine<HttpApiClient, BrowserHistory>;

/// Application-wide reactive context.
///
/// Provided at the root of the component tree; any child component can
/// access it with `use_context::<AppContext>()`. The engine, caches and
/// DOM handles are single-threaded (`Rc`) and therefore live in
/// local-storage `StoredValue`s; signals carry only the data views render
/// from.
///
/// Views do not observe the engine directly: every completed engine
/// mutation bumps `epoch`, and derived memos re-read the engine state
/// through accessors.
#[derive(Clone, Copy)]
pub struct AppContext {
    engine: StoredValue<Rc<Engine>, LocalStorage>,
    thumbs: StoredValue<Rc<ThumbnailCache>, LocalStorage>,
    overlays: StoredValue<Rc<RefCell<OverlayRegistry>>, LocalStorage>,
    loader: StoredValue<Rc<RefCell<LazyImageLoader>>, LocalStorage>,
    /// Cancellation handle for the pending single-click timer. Dropping
    /// the handle cancels the scheduled callback.
    click_timer: StoredValue<Rc<RefCell<Option<Timeout>>>, LocalStorage>,

    /// Bumped after every engine mutation; views depend on it.
    pub epoch: RwSignal<u64>,
    /// Advisory disk usage for the header; failures degrade silently.
    pub disk: RwSignal<Vec<DiskStat>>,
    /// Last transient error, shown until dismissed or replaced.
    pub last_error: RwSignal<Option<String>>,
    /// Whether the photo-wall section is open.
    pub gallery_open: RwSignal<bool>,
    /// Path whose preview overlay is currently showing, if any.
    pub preview_open: RwSignal<Option<String>>,
}

impl AppContext {
    pub fn new() -> Self {
        let engine = Rc::new(Engine::new(
            Rc::new(HttpApiClient),
            Rc::new(BrowserHistory),
        ));
        Self {
            engine: StoredValue::new_local(engine),
            thumbs: StoredValue::new_local(Rc::new(ThumbnailCache::new(THUMB_CACHE_CAPACITY))),
            overlays: StoredValue::new_local(Rc::new(RefCell::new(OverlayRegistry::new()))),
            loader: StoredValue::new_local(Rc::new(RefCell::new(LazyImageLoader::new(
                IMAGE_LOAD_BURST,
            )))),
            click_timer: StoredValue::new_local(Rc::new(RefCell::new(None))),
            epoch: RwSignal::new(0),
            disk: RwSignal::new(Vec::new()),
            last_error: RwSignal::new(None),
            gallery_open: RwSignal::new(false),
            preview_open: RwSignal::new(None),
        }
    }

    pub fn engine(&self) -> Rc<Engine> {
        self.engine.get_value()
    }

    pub fn thumbs(&self) -> Rc<ThumbnailCache> {
        self.thumbs.get_value()
    }

    pub fn overlays(&self) -> Rc<RefCell<OverlayRegistry>> {
        self.overlays.get_value()
    }

    pub fn loader(&self) -> Rc<RefCell<LazyImageLoader>> {
        self.loader.get_value()
    }

    /// Signal views to re-derive from the engine.
    pub fn bump(&self) {
        self.epoch.update(|n| *n += 1);
    }

    /// Surface a transient fetch error; state was left unchanged by the
    /// failed call, the user retries by repeating the action.
    pub fn report(&self, err: &FetchError) {
        let msg = err.to_string();
        dom::console_error(&msg);
        self.last_error.set(Some(msg));
    }

    /// Start the single-click debounce timer. When it fires without
    /// having been cancelled, the deferred expand/collapse runs.
    pub fn schedule_click_timer(&self) {
        let ctx = *self;
        let handle = Timeout::new(CLICK_DEBOUNCE_MS, move || {
            ctx.click_timer.get_value().borrow_mut().take();
            spawn_local(async move {
                if let Err(err) = ctx.engine().resolve_pending_click().await {
                    ctx.report(&err);
                }
                ctx.bump();
            });
        });
        // Replacing an earlier handle drops it, which cancels its timer.
        *self.click_timer.get_value().borrow_mut() = Some(handle);
    }

    /// Cancel the pending single-click timer (a double-click arrived).
    pub fn cancel_click_timer(&self) {
        if let Some(handle) = self.click_timer.get_value().borrow_mut().take() {
            handle.cancel();
        }
    }

    /// Refresh the advisory disk-usage stats. Errors are swallowed: the
    /// header simply keeps showing the previous numbers.
    pub fn refresh_disk(&self) {
        let ctx = *self;
        spawn_local(async move {
            if let Ok(stats) = HttpApiClient.disk_usage().await {
                ctx.disk.set(stats);
            }
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class="container text-center mt-5">
                    <h1 class="text-danger">"Something went wrong"</h1>
                    <p class="text-muted">
                        "An unexpected error occurred. Please try reloading the page."
                    </p>
                    <ul class="list-unstyled text-danger">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Browser />
        </ErrorBoundary>
    }
}
