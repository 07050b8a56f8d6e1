//! Directory listing table.
//!
//! Rows re-derive from the engine whenever the epoch signal bumps; the
//! `For` key includes the reconciler-managed label so highlight changes
//! rebuild exactly the rows they touch.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::core::{ClickDecision, path};
use crate::models::{Entry, Listing};

use super::preview;

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let files = Memo::new(move |_| {
        ctx.epoch.get();
        ctx.engine()
            .listing()
            .map(|listing| listing.files)
            .unwrap_or_default()
    });

    view! {
        <table class="table table-hover align-middle">
            <thead>
                <tr>
                    <th scope="col"></th>
                    <th scope="col">"Name"</th>
                    <th scope="col">"Tags"</th>
                    <th scope="col">"Size"</th>
                    <th scope="col">"Last Modified"</th>
                    <th scope="col"></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || files.get()
                    key=|entry| format!("{}|{}|{}", entry.path, entry.meta.label, entry.size)
                    children=move |entry| view! { <FileRow entry=entry /> }
                />
            </tbody>
        </table>
    }
}

/// One listing row plus, when its subtree is open, the inline sublist.
#[component]
fn FileRow(entry: Entry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let stored = StoredValue::new_local(entry.clone());

    let row_class = if entry.meta.label.is_empty() {
        String::new()
    } else {
        format!("table-{}", entry.meta.label)
    };
    let name = entry.name.clone();
    let checked = Memo::new(move |_| {
        ctx.epoch.get();
        ctx.engine().selection().is_selected(&name)
    });
    let path = entry.path.clone();
    let expanded = Memo::new(move |_| {
        ctx.epoch.get();
        ctx.engine().is_expanded(&path)
    });

    let on_select = move |ev: leptos::ev::Event| {
        let selected = event_target_checked(&ev);
        stored.with_value(|e| ctx.engine().select(&e.name, selected));
        ctx.bump();
    };

    // Directory clicks run through the debounce arbiter: the first click
    // defers an expand/collapse, a second click inside the window cancels
    // the timer and navigates. File clicks only move the highlight.
    let on_click = move |ev: leptos::ev::MouseEvent| {
        let entry = stored.get_value();
        if entry.is_dir {
            ev.prevent_default();
        }
        match ctx.engine().handle_entry_click(&entry) {
            ClickDecision::SelectionOnly => ctx.bump(),
            ClickDecision::Defer => ctx.schedule_click_timer(),
            ClickDecision::Navigate => {
                ctx.cancel_click_timer();
                preview::hide_all(ctx);
                ctx.refresh_disk();
                spawn_local(async move {
                    if let Err(err) = ctx.engine().navigate_to(&entry.path).await {
                        ctx.report(&err);
                    }
                    ctx.bump();
                });
            }
        }
    };

    let on_preview = move |_| {
        stored.with_value(|e| preview::toggle(ctx, e));
    };

    let name_cell = if entry.is_dir {
        view! {
            <a href="#" class="fw-bold text-decoration-none" on:click=on_click>
                {entry.name.clone()}
            </a>
        }
        .into_any()
    } else if !entry.short_cut.is_empty() {
        view! {
            <a href=entry.short_cut.clone() target="_blank" on:click=on_click>
                {entry.name.clone()}
            </a>
        }
        .into_any()
    } else {
        view! { <span on:click=on_click>{entry.name.clone()}</span> }.into_any()
    };

    view! {
        <tr class=row_class id=entry.hash.clone()>
            <td>
                <input
                    type="checkbox"
                    class="form-check-input"
                    prop:checked=move || checked.get()
                    on:change=on_select
                />
            </td>
            <td>
                {name_cell}
                {entry.meta.star.then(|| view! { <span class="ms-1 text-warning">"\u{2605}"</span> })}
                {(!entry.description.is_empty())
                    .then(|| view! { <small class="text-muted ms-2">{entry.description.clone()}</small> })}
            </td>
            <td>
                {entry
                    .sorted_tags()
                    .into_iter()
                    .map(|tag| view! { <span class="badge bg-secondary me-1">{tag}</span> })
                    .collect::<Vec<_>>()}
            </td>
            <td>{entry.size_h.clone()}</td>
            <td>{entry.mod_time_h.clone()}</td>
            <td>
                {entry.is_dir.then(|| view! {
                    <button
                        class="btn btn-sm btn-outline-secondary"
                        title="Preview"
                        on:click=on_preview
                    >
                        "\u{1F441}"
                    </button>
                })}
            </td>
        </tr>
        <Show when=move || expanded.get()>
            <SubListing parent=stored.get_value() />
        </Show>
    }
}

/// The children of an expanded directory, rendered inline under its row.
#[component]
fn SubListing(parent: Entry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let parent = StoredValue::new_local(parent);

    let children = Memo::new(move |_| {
        ctx.epoch.get();
        parent.with_value(|p| ctx.engine().expansion_children(&p.path))
    });

    view! {
        <tr class="table-secondary">
            <td></td>
            <td colspan="5">
                {move || match children.get() {
                    None => view! {
                        <div class="spinner-border spinner-border-sm" role="status"></div>
                    }
                    .into_any(),
                    Some(listing) => view! {
                        <SubEntries parent=parent.get_value() listing=listing />
                    }
                    .into_any(),
                }}
            </td>
        </tr>
    }
}

#[component]
fn SubEntries(parent: Entry, listing: Listing) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let dir = ctx.engine().current_path();

    view! {
        <ul class="list-unstyled mb-0">
            {listing
                .files
                .into_iter()
                .map(|sub| {
                    let href =
                        path::sub_link(&dir, &parent, &sub, crate::config::STATICS_PREFIX);
                    let is_image = sub.is_image;
                    let stored = StoredValue::new_local(sub.clone());
                    let on_preview = move |_| {
                        stored.with_value(|s| preview::toggle(ctx, s));
                    };
                    view! {
                        <li id=sub.hash.clone()>
                            <a href=href target="_blank">{sub.name.clone()}</a>
                            <span class="text-muted ms-2">{sub.size_h.clone()}</span>
                            {is_image.then(|| view! {
                                <button
                                    class="btn btn-sm btn-link py-0"
                                    on:click=on_preview
                                >
                                    "\u{1F441}"
                                </button>
                            })}
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ul>
    }
}
