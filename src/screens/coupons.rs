//! Coupons Screen

use leptos::prelude::*;

use crate::api::coupons::{self, Coupons};
use crate::components::{
    spawn_action, submit_modal, use_list, CheckField, DeleteConfirmButton, Field, ListStatus, ModalShell, Pagination,
    SearchBox,
};
use crate::context::use_app_context;
use crate::forms::{CouponField, CouponForm, Modal, PROMO_TYPES};
use crate::list::ListQuery;

fn promo_label(promo_type: &str) -> &str {
    PROMO_TYPES
        .iter()
        .find(|(value, _)| *value == promo_type)
        .map(|(_, label)| *label)
        .unwrap_or(promo_type)
}

#[component]
pub fn CouponsScreen() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(Coupons, ListQuery::new(ctx.config().default_page_size).sorted());
    let modal = RwSignal::new(Modal::<CouponForm>::new());

    let toggle_active = move |id: String, active: bool| {
        list.patch_local(|c| {
            c.patch(&id, |coupon| coupon.is_active = active);
        });
        spawn_action(
            ctx,
            async move {
                let result = coupons::set_active(&ctx.client(), &id, active).await;
                if result.is_err() {
                    list.patch_local(|c| {
                        c.patch(&id, |coupon| coupon.is_active = !active);
                    });
                }
                result
            },
            |_| (),
        );
    };

    let remove = move |id: String| {
        spawn_action(ctx, async move { coupons::delete(&ctx.client(), &id).await }, move |_| list.refetch());
    };

    view! {
        <section class="screen coupons">
            <header class="screen-header">
                <h1>"Coupons"</h1>
                <div class="stats">
                    <span>{move || format!("{} total", list.state.with(|c| c.total()))}</span>
                    <span>{move || format!("{} active", list.state.with(|c| c.stat("active")))}</span>
                </div>
            </header>
            <div class="toolbar">
                <SearchBox placeholder="Search code" on_commit=move |term: String| list.change(|c| c.set_search(&term)) />
                <button class="btn btn-primary" on:click=move |_| modal.update(|m| m.open_add())>"Add coupon"</button>
            </div>
            <ListStatus list=list empty="No coupons" />
            <table class="data-table">
                <thead>
                    <tr>
                        <th on:click=move |_| list.change(|c| c.sort_by("code"))>"Code"</th>
                        <th>"Type"</th>
                        <th on:click=move |_| list.change(|c| c.sort_by("value"))>"Value"</th>
                        <th>"Used"</th>
                        <th on:click=move |_| list.change(|c| c.sort_by("expiresAt"))>"Expires"</th>
                        <th>"Active"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.state.with(|c| c.items().to_vec())
                        key=|c| (c.id.clone(), c.code.clone(), c.is_active, c.used_count, c.value.to_bits())
                        children=move |coupon| {
                            let edit = coupon.clone();
                            let active_id = coupon.id.clone();
                            let delete_id = coupon.id.clone();
                            let active = coupon.is_active;
                            let uses = match coupon.max_uses {
                                Some(max) => format!("{} / {}", coupon.used_count, max),
                                None => coupon.used_count.to_string(),
                            };
                            view! {
                                <tr>
                                    <td><code>{coupon.code.clone()}</code></td>
                                    <td>{promo_label(&coupon.promo_type).to_string()}</td>
                                    <td>{format!("{:.2}", coupon.value)}</td>
                                    <td>{uses}</td>
                                    <td>{coupon.expires_at.map(|d| d.to_string()).unwrap_or_default()}</td>
                                    <td>
                                        <input
                                            type="checkbox"
                                            prop:checked=active
                                            on:change=move |_| toggle_active(active_id.clone(), !active)
                                        />
                                    </td>
                                    <td class="actions">
                                        <button
                                            class="btn"
                                            on:click=move |_| {
                                                modal.update(|m| m.open_edit(&edit.id, CouponForm::from_coupon(&edit)))
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <DeleteConfirmButton
                                            button_class="btn btn-danger"
                                            on_confirm=move |_| remove(delete_id.clone())
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Pagination list=list />
            <Show when=move || modal.with(|m| m.is_open())>
                <CouponFormModal modal=modal on_saved=move |_| list.refetch() />
            </Show>
        </section>
    }
}

#[component]
fn CouponFormModal(modal: RwSignal<Modal<CouponForm>>, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();

    let text = move |f: fn(&CouponForm) -> String| Signal::derive(move || modal.with(|m| f(m.form())));
    let on_field = move |(name, raw): (String, String)| {
        modal.update(|m| {
            let result = name.parse::<CouponField>().and_then(|field| m.form_mut().set(field, &raw));
            if let Err(e) = result {
                m.set_error(e.to_string());
            }
        });
    };

    view! {
        <ModalShell
            title=Signal::derive(move || {
                if modal.with(|m| m.editing_id().is_some()) { "Edit coupon" } else { "Add coupon" }.to_string()
            })
            error=Signal::derive(move || modal.with(|m| m.error().map(str::to_string)))
            submitting=Signal::derive(move || modal.with(|m| m.is_submitting()))
            on_close=move |_| modal.update(|m| m.close())
            on_submit=move |_| submit_modal(ctx, modal, move |_| on_saved.run(()))
        >
            <Field label="Code" name="code" value=text(|f| f.code.clone()) on_input=on_field />
            <label class="form-field">
                <span class="field-label">"Type"</span>
                <select
                    name="promoType"
                    prop:value=move || modal.with(|m| m.form().promo_type.clone())
                    on:change=move |ev| on_field(("promoType".to_string(), event_target_value(&ev)))
                >
                    {PROMO_TYPES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
            </label>
            <div class="form-row">
                <Field label="Value" name="value" kind="number" value=text(|f| f.value.to_string()) on_input=on_field />
                <Field
                    label="Minimum order"
                    name="minOrderAmount"
                    kind="number"
                    value=text(|f| f.min_order_amount.to_string())
                    on_input=on_field
                />
                <Field
                    label="Max uses (0 = unlimited)"
                    name="maxUses"
                    kind="number"
                    value=text(|f| f.max_uses.to_string())
                    on_input=on_field
                />
            </div>
            <div class="form-row">
                <Field label="Starts" name="startsAt" kind="date" value=text(|f| f.starts_at.clone()) on_input=on_field />
                <Field label="Expires" name="expiresAt" kind="date" value=text(|f| f.expires_at.clone()) on_input=on_field />
            </div>
            <CheckField
                label="Active"
                name="isActive"
                checked=Signal::derive(move || modal.with(|m| m.form().is_active))
                on_input=on_field
            />
        </ModalShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promo_label() {
        assert_eq!(promo_label("free_shipping"), "Free shipping");
        assert_eq!(promo_label("bogo"), "bogo");
    }
}
