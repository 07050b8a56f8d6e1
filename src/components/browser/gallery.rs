//! Photo wall: sequential, scroll-paced loading of the current
//! directory's images.
//!
//! The pacing decisions live in [`LazyImageLoader`]; this component is the
//! DOM driver. Each step loads one off-screen `HtmlImageElement` so the
//! natural width is known before the visible placement is appended, and a
//! window scroll listener resumes the loader after each burst.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use crate::app::AppContext;
use crate::config::STATICS_PREFIX;
use crate::core::{LoaderStep, Placement, WidthSpec};
use crate::utils::dom;

const WALL_ID: &str = "photo_wall";

#[component]
pub fn Gallery() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let loading = RwSignal::new(false);
    let done = RwSignal::new(false);

    // Restart whenever the wall is opened or the directory changes while
    // it is open. `start` bumps the run token, so a load event left over
    // from the previous run is rejected by `image_loaded` and places
    // nothing.
    Effect::new(move |_| {
        let open = ctx.gallery_open.get();
        ctx.epoch.get();
        done.set(false);
        loading.set(false);
        if !open {
            return;
        }
        let urls: Vec<String> = ctx
            .engine()
            .listing()
            .map(|listing| {
                listing
                    .files
                    .iter()
                    .filter(|entry| entry.is_image)
                    .map(|entry| image_url(&entry.path))
                    .collect()
            })
            .unwrap_or_default();
        if let Some(document) = dom::document()
            && let Some(wall) = document.get_element_by_id(WALL_ID)
        {
            wall.set_inner_html("");
        }
        let step = ctx.loader().borrow_mut().start(urls, 0);
        drive(ctx, step, loading, done);
    });

    // Scroll resumes a paused loader. Registered once for the component's
    // lifetime; the closure is leaked intentionally.
    Effect::new(move |registered: Option<bool>| {
        if registered == Some(true) {
            return true;
        }
        let on_scroll = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let step = ctx.loader().borrow_mut().on_scroll();
            if let Some(step) = step {
                drive(ctx, step, loading, done);
            }
        }));
        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        }
        on_scroll.forget();
        true
    });

    view! {
        <div class="mt-3" class=("d-none", move || !ctx.gallery_open.get())>
            <div id=WALL_ID class="text-center"></div>
            <Show when=move || loading.get()>
                <div class="text-center my-3">
                    <div class="spinner-border" role="status"></div>
                </div>
            </Show>
            <Show when=move || done.get()>
                <div class="text-center text-muted my-3">"All photos loaded"</div>
            </Show>
        </div>
    }
}

fn image_url(path: &str) -> String {
    let raw = format!("{}{}", STATICS_PREFIX, path);
    js_sys::encode_uri(&raw).as_string().unwrap_or(raw)
}

fn drive(ctx: AppContext, step: LoaderStep, loading: RwSignal<bool>, done: RwSignal<bool>) {
    match step {
        LoaderStep::Load { url } => {
            loading.set(true);
            load_one(ctx, url, loading, done);
        }
        LoaderStep::Pause => loading.set(false),
        LoaderStep::Finished => {
            loading.set(false);
            done.set(true);
        }
    }
}

/// Load one image off-screen; on its load event, place it and follow the
/// loader's next step.
fn load_one(ctx: AppContext, url: String, loading: RwSignal<bool>, done: RwSignal<bool>) {
    let Ok(img) = web_sys::HtmlImageElement::new() else {
        loading.set(false);
        return;
    };
    let token = ctx.loader().borrow().run_token();
    let probe = img.clone();
    let on_load = Closure::once(move || {
        let natural = probe.natural_width();
        let natural = (natural > 0).then_some(natural);
        let viewport = dom::viewport_width().max(1);
        // A stale token means the wall restarted while this image was in
        // flight; its event must not touch the new run.
        let Some((placement, step)) = ctx
            .loader()
            .borrow_mut()
            .image_loaded(token, natural, viewport)
        else {
            return;
        };
        append_placement(&placement);
        drive(ctx, step, loading, done);
    });
    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();
    img.set_src(&url);
}

fn append_placement(placement: &Placement) {
    let Some(document) = dom::document() else {
        return;
    };
    let Some(wall) = document.get_element_by_id(WALL_ID) else {
        return;
    };
    let Ok(block) = document.create_element("div") else {
        return;
    };
    block.set_class_name("mb-2");

    let Ok(img) = document.create_element("img") else {
        return;
    };
    let _ = img.set_attribute("src", &placement.url);
    let _ = img.set_attribute("loading", "eager");
    let width = match placement.width {
        WidthSpec::Px(px) => px.to_string(),
        // Natural width unknown: fill the container instead.
        WidthSpec::Fallback => "99%".to_string(),
    };
    let _ = img.set_attribute("width", &width);

    let Ok(caption) = document.create_element("div") else {
        return;
    };
    caption.set_class_name("text-muted small");
    caption.set_text_content(Some(&format!("{}/{}", placement.position, placement.total)));

    let _ = block.append_child(&img);
    let _ = block.append_child(&caption);
    let _ = wall.append_child(&block);
}
