//! Orders Screen

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::orders::{self, Orders, ORDER_STATUSES};
use crate::api::livreurs;
use crate::components::{spawn_action, use_list, FilterSelect, ListStatus, Pagination, SearchBox};
use crate::context::use_app_context;
use crate::http::QueryParams;
use crate::list::ListQuery;
use crate::models::Livreur;

#[component]
pub fn OrdersScreen() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(Orders, ListQuery::new(ctx.config().default_page_size).sorted());
    let (couriers, set_couriers) = signal(Vec::<Livreur>::new());

    // Couriers for the assign dropdown
    Effect::new(move |_| {
        ctx.reload_trigger.track();
        spawn_local(async move {
            let params = QueryParams::new().with("availability", "available").with("limit", 100);
            match livreurs::list(&ctx.client(), params).await {
                Ok(page) => set_couriers.set(page.items),
                Err(e) => log::warn!("[ORDERS] Could not load couriers: {}", e),
            }
        });
    });

    let set_status = move |id: String, status: String| {
        let previous = list.state.with_untracked(|c| {
            c.items().iter().find(|o| o.id == id).map(|o| o.status.clone())
        });
        list.patch_local(|c| {
            c.patch(&id, |o| o.status = status.clone());
        });
        spawn_action(
            ctx,
            async move {
                let result = orders::update_status(&ctx.client(), &id, &status).await;
                if let (Err(_), Some(previous)) = (&result, previous) {
                    list.patch_local(|c| {
                        c.patch(&id, |o| o.status = previous);
                    });
                }
                result
            },
            |_| (),
        );
    };

    let assign = move |id: String, livreur_id: String| {
        if livreur_id.is_empty() {
            return;
        }
        spawn_action(
            ctx,
            async move { orders::assign_livreur(&ctx.client(), &id, &livreur_id).await },
            move |_| list.refetch(),
        );
    };

    let status_filter = Signal::derive(move || {
        list.state.with(|c| c.query().filters.get("status").unwrap_or("").to_string())
    });

    view! {
        <section class="screen orders">
            <header class="screen-header">
                <h1>"Orders"</h1>
                <div class="stats">
                    {ORDER_STATUSES
                        .iter()
                        .map(|status| {
                            view! {
                                <span class=format!("badge status-{}", status)>
                                    {move || format!("{} {}", list.state.with(|c| c.stat(status)), status)}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>
            </header>
            <div class="toolbar">
                <SearchBox
                    placeholder="Order number or customer"
                    on_commit=move |term: String| list.change(|c| c.set_search(&term))
                />
                <FilterSelect
                    label="Status"
                    options=ORDER_STATUSES
                    value=status_filter
                    on_change=move |v: String| list.change(|c| c.set_filter("status", &v))
                />
            </div>
            <ListStatus list=list empty="No orders" />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Order"</th>
                        <th>"Customer"</th>
                        <th>"Items"</th>
                        <th on:click=move |_| list.change(|c| c.sort_by("totalAmount"))>"Total"</th>
                        <th>"Status"</th>
                        <th>"Courier"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.state.with(|c| c.items().to_vec())
                        key=|o| (o.id.clone(), o.status.clone(), o.livreur.as_ref().map(|l| l.id.clone()))
                        children=move |order| {
                            let status_id = order.id.clone();
                            let assign_id = order.id.clone();
                            let courier = order.livreur.as_ref().map(|l| l.id.clone()).unwrap_or_default();
                            let item_count: u32 = order.items.iter().map(|line| line.quantity).sum();
                            view! {
                                <tr>
                                    <td>{order.order_number.clone()}</td>
                                    <td>{order.customer.as_ref().map(|c| c.name.clone()).unwrap_or_default()}</td>
                                    <td>{item_count}</td>
                                    <td>{format!("{:.2}", order.total_amount)}</td>
                                    <td>
                                        <select
                                            prop:value=order.status.clone()
                                            on:change=move |ev| set_status(status_id.clone(), event_target_value(&ev))
                                        >
                                            {ORDER_STATUSES
                                                .iter()
                                                .map(|s| view! { <option value=*s>{*s}</option> })
                                                .collect_view()}
                                        </select>
                                    </td>
                                    <td>
                                        <select
                                            prop:value=courier
                                            on:change=move |ev| assign(assign_id.clone(), event_target_value(&ev))
                                        >
                                            <option value="">"Unassigned"</option>
                                            {move || {
                                                couriers
                                                    .get()
                                                    .into_iter()
                                                    .map(|l| view! { <option value=l.id.clone()>{l.name.clone()}</option> })
                                                    .collect_view()
                                            }}
                                        </select>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Pagination list=list />
        </section>
    }
}
