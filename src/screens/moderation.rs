//! Moderation Queue Screen
//!
//! Vendor submissions awaiting review. Approving removes the card at once;
//! rejecting first asks for a reason that is forwarded to the vendor.

use leptos::prelude::*;

use crate::api::moderation::{self, PendingProducts};
use crate::components::{spawn_action, use_list, ListStatus, Pagination, SearchBox};
use crate::context::use_app_context;
use crate::list::ListQuery;
use crate::models::Product;

#[component]
pub fn ModerationScreen() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(PendingProducts, ListQuery::new(ctx.config().default_page_size));
    // Product currently being rejected, and the reason typed so far
    let rejecting = RwSignal::new(None::<Product>);
    let (reason, set_reason) = signal(String::new());

    let approve = move |id: String| {
        let local_id = id.clone();
        spawn_action(ctx, async move { moderation::approve(&ctx.client(), &id).await }, move |_| {
            list.patch_local(|c| {
                c.remove(&local_id);
            });
            list.refetch();
        });
    };

    let confirm_reject = move |_| {
        let Some(product) = rejecting.get_untracked() else {
            return;
        };
        let text = reason.get_untracked();
        let id = product.id.clone();
        spawn_action(ctx, async move { moderation::reject(&ctx.client(), &id, &text).await }, move |_| {
            rejecting.set(None);
            set_reason.set(String::new());
            list.patch_local(|c| {
                c.remove(&product.id);
            });
            list.refetch();
        });
    };

    view! {
        <section class="screen moderation">
            <header class="screen-header">
                <h1>"Moderation"</h1>
                <span>{move || format!("{} awaiting review", list.state.with(|c| c.total()))}</span>
            </header>
            <div class="toolbar">
                <SearchBox
                    placeholder="Search submissions"
                    on_commit=move |term: String| list.change(|c| c.set_search(&term))
                />
            </div>
            <ListStatus list=list empty="Nothing to review" />
            <div class="review-grid">
                <For
                    each=move || list.state.with(|c| c.items().to_vec())
                    key=|p| p.id.clone()
                    children=move |product| {
                        let approve_id = product.id.clone();
                        let target = product.clone();
                        view! {
                            <article class="review-card">
                                {product.primary_image().map(|src| view! { <img src=src.to_string() /> })}
                                <h3>{product.name.clone()}</h3>
                                <p class="muted">
                                    {product.vendor.as_ref().map(|v| v.name.clone()).unwrap_or_default()}
                                    " · "
                                    {product.category.as_ref().map(|c| c.name.clone()).unwrap_or_default()}
                                </p>
                                <p class="price">{format!("{:.2}", product.price)}</p>
                                <p class="description">{product.description.clone()}</p>
                                <div class="actions">
                                    <button class="btn btn-primary" on:click=move |_| approve(approve_id.clone())>
                                        "Approve"
                                    </button>
                                    <button
                                        class="btn btn-danger"
                                        on:click=move |_| {
                                            set_reason.set(String::new());
                                            rejecting.set(Some(target.clone()));
                                        }
                                    >
                                        "Reject"
                                    </button>
                                </div>
                            </article>
                        }
                    }
                />
            </div>
            <Pagination list=list />
            <Show when=move || rejecting.with(|r| r.is_some())>
                <div class="modal-overlay" on:click=move |_| rejecting.set(None)>
                    <div class="modal" on:click=|ev| ev.stop_propagation()>
                        <div class="modal-header">
                            <h2>
                                {move || {
                                    rejecting.with(|r| r.as_ref().map(|p| format!("Reject {}", p.name)).unwrap_or_default())
                                }}
                            </h2>
                        </div>
                        <div class="modal-body">
                            <textarea
                                placeholder="Reason shown to the vendor"
                                prop:value=move || reason.get()
                                on:input=move |ev| set_reason.set(event_target_value(&ev))
                            ></textarea>
                        </div>
                        <div class="modal-footer">
                            <button class="btn" on:click=move |_| rejecting.set(None)>"Cancel"</button>
                            <button
                                class="btn btn-danger"
                                disabled=move || reason.with(|r| r.trim().is_empty())
                                on:click=confirm_reject
                            >
                                "Reject"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </section>
    }
}
