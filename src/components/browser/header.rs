//! Top bar: disk usage, up button, search box, sort toggles, gallery
//! toggle and the transient error alert.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::config::{DISK_DANGER_PERCENT, DISK_WARN_PERCENT};
use crate::models::{Route, SortField};
use crate::utils::{dom, format};

use super::preview;

fn usage_class(percent: f64) -> &'static str {
    if percent > DISK_DANGER_PERCENT {
        "text-danger blink_me"
    } else if percent > DISK_WARN_PERCENT {
        "text-warning blink_me"
    } else {
        "text-muted"
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Seed the input from the URL so a shared ?search= link shows its
    // filter; afterwards the input is the source of truth.
    let search = RwSignal::new(Route::current().search.unwrap_or_default());

    let on_search = move |ev: leptos::ev::Event| {
        let term = event_target_value(&ev);
        search.set(term.clone());
        dom::replace_query_param("search", &term);
        spawn_local(async move {
            if let Err(err) = ctx.engine().set_search(&term).await {
                ctx.report(&err);
            }
            ctx.bump();
        });
    };

    let on_up = move |_| {
        preview::hide_all(ctx);
        ctx.refresh_disk();
        spawn_local(async move {
            if let Err(err) = ctx.engine().navigate_up().await {
                ctx.report(&err);
            }
            ctx.bump();
        });
    };

    let sort_by = move |field: SortField| {
        move |_: leptos::ev::MouseEvent| {
            spawn_local(async move {
                if let Err(err) = ctx.engine().toggle_sort(field).await {
                    ctx.report(&err);
                }
                ctx.bump();
            });
        }
    };

    view! {
        <nav class="navbar navbar-expand bg-body-tertiary mb-2">
            <div class="container-fluid">
                <button class="btn btn-outline-primary me-2" on:click=on_up>
                    "\u{2191} Up"
                </button>

                <input
                    type="search"
                    class="form-control me-2"
                    style="max-width: 16rem;"
                    placeholder="Filter names..."
                    prop:value=move || search.get()
                    on:change=on_search
                />

                <div class="btn-group me-2" role="group">
                    <button class="btn btn-sm btn-outline-secondary" on:click=sort_by(SortField::Name)>
                        "Name"
                    </button>
                    <button class="btn btn-sm btn-outline-secondary" on:click=sort_by(SortField::Size)>
                        "Size"
                    </button>
                    <button class="btn btn-sm btn-outline-secondary" on:click=sort_by(SortField::Time)>
                        "Time"
                    </button>
                </div>

                <button
                    class="btn btn-sm btn-outline-secondary me-auto"
                    on:click=move |_| ctx.gallery_open.update(|open| *open = !*open)
                >
                    "Photos"
                </button>

                <ul class="navbar-nav">
                    <For
                        each=move || ctx.disk.get()
                        key=|stat| stat.path.clone()
                        children=|stat| {
                            let class = usage_class(stat.used_percent);
                            view! {
                                <li class="nav-item me-3">
                                    <span class=class>
                                        {format!(
                                            "{} {} free ({})",
                                            stat.path,
                                            format::format_size(stat.free as i64),
                                            format::format_percent(stat.used_percent),
                                        )}
                                    </span>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </nav>

        <Show when=move || ctx.last_error.get().is_some()>
            <div class="alert alert-danger alert-dismissible" role="alert">
                {move || ctx.last_error.get().unwrap_or_default()}
                <button
                    type="button"
                    class="btn-close"
                    on:click=move |_| ctx.last_error.set(None)
                ></button>
            </div>
        </Show>
    }
}
