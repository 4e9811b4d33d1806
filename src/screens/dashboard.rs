//! Dashboard Screen

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::dashboard;
use crate::context::{use_app_context, Screen};
use crate::models::DashboardOverview;

#[component]
pub fn DashboardScreen() -> impl IntoView {
    let ctx = use_app_context();
    let (overview, set_overview) = signal::<Option<DashboardOverview>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        spawn_local(async move {
            match dashboard::overview(&ctx.client()).await {
                Ok(data) => {
                    set_error.set(None);
                    set_overview.set(Some(data));
                }
                Err(e) => {
                    log::error!("[DASHBOARD] Failed to load overview: {}", e);
                    set_error.set(Some(e.user_message()));
                }
            }
        });
    });

    let stat = move |f: fn(&DashboardOverview) -> String| {
        Signal::derive(move || overview.with(|o| o.as_ref().map(f).unwrap_or_else(|| "-".to_string())))
    };

    view! {
        <section class="screen dashboard">
            <h1>"Dashboard"</h1>
            {move || error.get().map(|e| view! { <div class="list-error">{e}</div> })}
            <div class="stat-grid">
                <StatCard label="Users" value=stat(|o| o.total_users.to_string()) target=Screen::Users />
                <StatCard label="Vendors" value=stat(|o| o.total_vendors.to_string()) target=Screen::Vendors />
                <StatCard label="Products" value=stat(|o| o.total_products.to_string()) target=Screen::Products />
                <StatCard label="Orders" value=stat(|o| o.total_orders.to_string()) target=Screen::Orders />
                <StatCard label="Revenue" value=stat(|o| format!("{:.2}", o.revenue)) target=Screen::Orders />
                <StatCard
                    label="Awaiting review"
                    value=stat(|o| o.pending_products.to_string())
                    target=Screen::Moderation
                />
            </div>
            <h2>"Recent orders"</h2>
            <table class="data-table">
                <thead>
                    <tr><th>"Order"</th><th>"Customer"</th><th>"Total"</th><th>"Status"</th></tr>
                </thead>
                <tbody>
                    <For
                        each=move || overview.with(|o| o.as_ref().map(|o| o.recent_orders.clone()).unwrap_or_default())
                        key=|order| (order.id.clone(), order.status.clone())
                        children=move |order| {
                            view! {
                                <tr>
                                    <td>{order.order_number.clone()}</td>
                                    <td>{order.customer.as_ref().map(|c| c.name.clone()).unwrap_or_default()}</td>
                                    <td>{format!("{:.2}", order.total_amount)}</td>
                                    <td><span class=format!("badge status-{}", order.status)>{order.status.clone()}</span></td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<String>, target: Screen) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <button class="stat-card" on:click=move |_| ctx.navigate(target)>
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}</span>
        </button>
    }
}
