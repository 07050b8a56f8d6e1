//! Breadcrumb trail with jump-to-ancestor links.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::core::path;

use super::preview;

#[component]
pub fn PathBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let crumbs = Memo::new(move |_| {
        ctx.epoch.get();
        ctx.engine().state().breadcrumbs
    });

    let jump = move |count: usize| {
        let target = path::prefix_of(&crumbs.get_untracked(), count);
        preview::hide_all(ctx);
        spawn_local(async move {
            if let Err(err) = ctx.engine().navigate_to(&target).await {
                ctx.report(&err);
            }
            ctx.bump();
        });
    };

    view! {
        <nav aria-label="breadcrumb">
            <ol class="breadcrumb">
                <li class="breadcrumb-item">
                    <a href="#" on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.prevent_default();
                        jump(0);
                    }>
                        "root"
                    </a>
                </li>
                <For
                    each=move || { crumbs.get().into_iter().enumerate().collect::<Vec<_>>() }
                    key=|(index, segment)| (*index, segment.clone())
                    children=move |(index, segment)| {
                        view! {
                            <li class="breadcrumb-item">
                                <a href="#" on:click=move |ev: leptos::ev::MouseEvent| {
                                    ev.prevent_default();
                                    jump(index + 1);
                                }>
                                    {segment}
                                </a>
                            </li>
                        }
                    }
                />
            </ol>
        </nav>
    }
}
