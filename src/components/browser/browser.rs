//! Top-level browser layout and location wiring.
//!
//! On mount: parse the current location, preset any `?search=` filter,
//! load the initial listing, then honor the `?q=` jump target by
//! scrolling to (and highlighting) the first matching entry. Back/forward
//! events re-list the restored path without pushing history again.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::models::Route;
use crate::utils::dom;

use super::actions::ActionsPanel;
use super::file_list::FileList;
use super::gallery::Gallery;
use super::header::Header;
use super::pathbar::PathBar;
use super::preview;

#[component]
pub fn Browser() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    Effect::new(move |initialized: Option<bool>| {
        if initialized == Some(true) {
            return true;
        }

        let route = Route::current();
        if let Some(term) = &route.search {
            ctx.engine().preset_search(term);
        }
        ctx.refresh_disk();

        let path = route.path.clone();
        let jump = route.jump_to.clone();
        spawn_local(async move {
            match ctx.engine().sync_from_history(&path).await {
                Ok(_) => {
                    if let Some(fragment) = jump {
                        jump_to_entry(ctx, &fragment);
                    }
                }
                Err(err) => ctx.report(&err),
            }
            ctx.bump();
        });

        // Back/forward restores the path encoded in the location.
        let on_popstate = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let route = Route::current();
            preview::hide_all(ctx);
            spawn_local(async move {
                if let Err(err) = ctx.engine().sync_from_history(&route.path).await {
                    ctx.report(&err);
                }
                ctx.bump();
            });
        }));
        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
        }
        on_popstate.forget();
        true
    });

    view! {
        <div class="container-xxl mt-2">
            <Header />
            <PathBar />
            <FileList />
            <Gallery />
            <ActionsPanel />
        </div>
    }
}

/// Scroll to the first entry whose name contains `fragment` and move the
/// highlight onto it. A fragment with no match scrolls nowhere.
fn jump_to_entry(ctx: AppContext, fragment: &str) {
    let target = ctx.engine().listing().and_then(|listing| {
        listing
            .files
            .iter()
            .find(|entry| entry.name.contains(fragment))
            .map(|entry| (entry.name.clone(), entry.hash.clone()))
    });
    if let Some((name, hash)) = target {
        ctx.engine().touch(&name);
        ctx.bump();
        dom::scroll_to_element(&hash);
    }
}
