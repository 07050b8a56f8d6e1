//! Bulk-operation panel for the current selection.
//!
//! Visible only while something is selected. Every action posts the whole
//! selection map; on success the engine clears the selection and
//! refreshes the listing, and the disk stats are refreshed alongside.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;

#[component]
pub fn ActionsPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let names = Memo::new(move |_| {
        ctx.epoch.get();
        ctx.engine().selection().names()
    });

    let run = move |action: &'static str| {
        move |_: leptos::ev::MouseEvent| {
            spawn_local(async move {
                match ctx.engine().run_operation(action).await {
                    Ok(_) => ctx.refresh_disk(),
                    Err(err) => ctx.report(&err),
                }
                ctx.bump();
            });
        }
    };

    view! {
        <Show when=move || !names.get().is_empty()>
            <div
                class="card position-fixed bottom-0 end-0 m-3 shadow"
                style="z-index: 1040; min-width: 16rem;"
            >
                <div class="card-header">
                    {move || format!("{} selected", names.get().len())}
                </div>
                <ul class="list-group list-group-flush">
                    <For
                        each=move || names.get()
                        key=|name| name.clone()
                        children=|name| view! { <li class="list-group-item py-1">{name}</li> }
                    />
                </ul>
                <div class="card-body d-flex flex-wrap gap-1">
                    <button class="btn btn-sm btn-danger" on:click=run("delete")>
                        "Delete"
                    </button>
                    <button class="btn btn-sm btn-outline-secondary" on:click=run("restore")>
                        "Restore"
                    </button>
                    <button class="btn btn-sm btn-outline-secondary" on:click=run("unzip")>
                        "Unzip"
                    </button>
                    <button class="btn btn-sm btn-outline-warning" on:click=run("star")>
                        "Star"
                    </button>
                    <button class="btn btn-sm btn-outline-secondary" on:click=run("star=0")>
                        "Unstar"
                    </button>
                    <button class="btn btn-sm btn-outline-success" on:click=run("label=success")>
                        "Green"
                    </button>
                    <button class="btn btn-sm btn-outline-danger" on:click=run("label=danger")>
                        "Red"
                    </button>
                    <button class="btn btn-sm btn-outline-secondary" on:click=run("label=")>
                        "Clear label"
                    </button>
                </div>
            </div>
        </Show>
    }
}
