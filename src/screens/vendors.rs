//! Vendors Screen

use leptos::prelude::*;

use crate::api::vendors::{self, Vendors, VENDOR_STATUSES};
use crate::components::{spawn_action, use_list, FilterSelect, ListStatus, Pagination, SearchBox};
use crate::context::use_app_context;
use crate::list::ListQuery;

#[component]
pub fn VendorsScreen() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(Vendors, ListQuery::new(ctx.config().default_page_size).sorted());

    let set_status = move |id: String, status: String| {
        spawn_action(
            ctx,
            async move { vendors::update_status(&ctx.client(), &id, &status).await },
            move |_| list.refetch(),
        );
    };

    let set_commission = move |id: String, raw: String| {
        let rate = match raw.trim().parse::<f64>() {
            Ok(rate) => rate,
            Err(_) => {
                ctx.notify(format!("'{}' is not a number", raw.trim()));
                return;
            }
        };
        let patch_id = id.clone();
        spawn_action(ctx, async move { vendors::update_commission(&ctx.client(), &id, rate).await }, move |_| {
            list.patch_local(|c| {
                c.patch(&patch_id, |v| v.commission_rate = rate);
            });
        });
    };

    let status_filter = Signal::derive(move || {
        list.state.with(|c| c.query().filters.get("status").unwrap_or("").to_string())
    });

    view! {
        <section class="screen vendors">
            <header class="screen-header">
                <h1>"Vendors"</h1>
                <div class="stats">
                    {VENDOR_STATUSES
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
                    placeholder="Shop or owner"
                    on_commit=move |term: String| list.change(|c| c.set_search(&term))
                />
                <FilterSelect
                    label="Status"
                    options=VENDOR_STATUSES
                    value=status_filter
                    on_change=move |v: String| list.change(|c| c.set_filter("status", &v))
                />
            </div>
            <ListStatus list=list empty="No vendors" />
            <table class="data-table">
                <thead>
                    <tr>
                        <th on:click=move |_| list.change(|c| c.sort_by("shopName"))>"Shop"</th>
                        <th>"Owner"</th>
                        <th>"Email"</th>
                        <th on:click=move |_| list.change(|c| c.sort_by("productsCount"))>"Products"</th>
                        <th>"Commission %"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.state.with(|c| c.items().to_vec())
                        key=|v| (v.id.clone(), v.status.clone(), v.commission_rate.to_bits())
                        children=move |vendor| {
                            let status_id = vendor.id.clone();
                            let commission_id = vendor.id.clone();
                            view! {
                                <tr>
                                    <td>{vendor.shop_name.clone()}</td>
                                    <td>{vendor.owner_name.clone()}</td>
                                    <td>{vendor.email.clone()}</td>
                                    <td>{vendor.products_count}</td>
                                    <td>
                                        <input
                                            type="number"
                                            min="0"
                                            max="100"
                                            step="0.5"
                                            class="inline-number"
                                            prop:value=vendor.commission_rate.to_string()
                                            on:change=move |ev| {
                                                set_commission(commission_id.clone(), event_target_value(&ev))
                                            }
                                        />
                                    </td>
                                    <td>
                                        <select
                                            prop:value=vendor.status.clone()
                                            on:change=move |ev| set_status(status_id.clone(), event_target_value(&ev))
                                        >
                                            {VENDOR_STATUSES
                                                .iter()
                                                .map(|s| view! { <option value=*s>{*s}</option> })
                                                .collect_view()}
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
