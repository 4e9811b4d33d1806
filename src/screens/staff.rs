//! Staff Screens
//!
//! Moderators and delivery people share the same add/edit/activate shape,
//! so both live here.

use leptos::prelude::*;

use crate::api::livreurs::{self, Livreurs, AVAILABILITY};
use crate::api::moderators::{self, Moderators};
use crate::components::{
    spawn_action, submit_modal, use_list, CheckField, DeleteConfirmButton, Field, FilterSelect, ListStatus, ModalShell,
    Pagination, SearchBox,
};
use crate::context::use_app_context;
use crate::forms::{LivreurForm, Modal, ModeratorForm, MODERATOR_PERMISSIONS, VEHICLE_TYPES};
use crate::list::ListQuery;

#[component]
pub fn ModeratorsScreen() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(Moderators, ListQuery::new(ctx.config().default_page_size).sorted());
    let modal = RwSignal::new(Modal::<ModeratorForm>::new());

    let toggle_active = move |id: String, active: bool| {
        list.patch_local(|c| {
            c.patch(&id, |m| m.is_active = active);
        });
        spawn_action(
            ctx,
            async move {
                let result = moderators::set_active(&ctx.client(), &id, active).await;
                if result.is_err() {
                    list.patch_local(|c| {
                        c.patch(&id, |m| m.is_active = !active);
                    });
                }
                result
            },
            |_| (),
        );
    };

    let remove = move |id: String| {
        spawn_action(ctx, async move { moderators::delete(&ctx.client(), &id).await }, move |_| list.refetch());
    };

    view! {
        <section class="screen moderators">
            <header class="screen-header">
                <h1>"Moderators"</h1>
                <span>{move || format!("{} total", list.state.with(|c| c.total()))}</span>
            </header>
            <div class="toolbar">
                <SearchBox
                    placeholder="Search name or email"
                    on_commit=move |term: String| list.change(|c| c.set_search(&term))
                />
                <button class="btn btn-primary" on:click=move |_| modal.update(|m| m.open_add())>"Add moderator"</button>
            </div>
            <ListStatus list=list empty="No moderators" />
            <table class="data-table">
                <thead>
                    <tr>
                        <th on:click=move |_| list.change(|c| c.sort_by("name"))>"Name"</th>
                        <th>"Email"</th>
                        <th>"Permissions"</th>
                        <th>"Active"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.state.with(|c| c.items().to_vec())
                        key=|m| (m.id.clone(), m.name.clone(), m.is_active, m.permissions.len())
                        children=move |moderator| {
                            let edit = moderator.clone();
                            let active_id = moderator.id.clone();
                            let delete_id = moderator.id.clone();
                            let active = moderator.is_active;
                            view! {
                                <tr>
                                    <td>{moderator.name.clone()}</td>
                                    <td>{moderator.email.clone()}</td>
                                    <td>
                                        {moderator
                                            .permissions
                                            .iter()
                                            .map(|p| view! { <span class="chip">{p.clone()}</span> })
                                            .collect_view()}
                                    </td>
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
                                                modal.update(|m| {
                                                    m.open_edit(&edit.id, ModeratorForm::from_moderator(&edit))
                                                })
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
                <ModeratorFormModal modal=modal on_saved=move |_| list.refetch() />
            </Show>
        </section>
    }
}

#[component]
fn ModeratorFormModal(modal: RwSignal<Modal<ModeratorForm>>, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let editing = modal.with_untracked(|m| m.editing_id().is_some());

    let text = move |f: fn(&ModeratorForm) -> String| Signal::derive(move || modal.with(|m| f(m.form())));
    let on_field = move |(name, raw): (String, String)| {
        modal.update(|m| {
            let form = m.form_mut();
            match name.as_str() {
                "name" => form.name = raw,
                "email" => form.email = raw.trim().to_string(),
                "password" => form.password = raw,
                "isActive" => form.is_active = raw == "true",
                _ => {}
            }
        });
    };

    view! {
        <ModalShell
            title={if editing { "Edit moderator" } else { "Add moderator" }.to_string()}
            error=Signal::derive(move || modal.with(|m| m.error().map(str::to_string)))
            submitting=Signal::derive(move || modal.with(|m| m.is_submitting()))
            on_close=move |_| modal.update(|m| m.close())
            on_submit=move |_| submit_modal(ctx, modal, move |_| on_saved.run(()))
        >
            <Field label="Name" name="name" value=text(|f| f.name.clone()) on_input=on_field />
            <Field label="Email" name="email" kind="email" value=text(|f| f.email.clone()) on_input=on_field />
            <Field
                label={if editing { "New password (optional)" } else { "Password" }}
                name="password"
                kind="password"
                value=text(|f| f.password.clone())
                on_input=on_field
            />
            <fieldset>
                <legend>"Permissions"</legend>
                {MODERATOR_PERMISSIONS
                    .iter()
                    .map(|permission| {
                        view! {
                            <label class="form-field checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || modal.with(|m| m.form().permissions.contains(permission))
                                    on:change=move |_| modal.update(|m| m.form_mut().toggle_permission(permission))
                                />
                                <span class="field-label">{*permission}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>
            <CheckField
                label="Active"
                name="isActive"
                checked=Signal::derive(move || modal.with(|m| m.form().is_active))
                on_input=on_field
            />
        </ModalShell>
    }
}

#[component]
pub fn LivreursScreen() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(Livreurs, ListQuery::new(ctx.config().default_page_size).sorted());
    let modal = RwSignal::new(Modal::<LivreurForm>::new());

    let set_availability = move |id: String, availability: String| {
        let previous = list.state.with_untracked(|c| {
            c.items().iter().find(|l| l.id == id).map(|l| l.availability.clone())
        });
        list.patch_local(|c| {
            c.patch(&id, |l| l.availability = availability.clone());
        });
        spawn_action(
            ctx,
            async move {
                let result = livreurs::update_availability(&ctx.client(), &id, &availability).await;
                if let (Err(_), Some(previous)) = (&result, previous) {
                    list.patch_local(|c| {
                        c.patch(&id, |l| l.availability = previous);
                    });
                }
                result
            },
            |_| (),
        );
    };

    let remove = move |id: String| {
        spawn_action(ctx, async move { livreurs::delete(&ctx.client(), &id).await }, move |_| list.refetch());
    };

    let availability_filter = Signal::derive(move || {
        list.state.with(|c| c.query().filters.get("availability").unwrap_or("").to_string())
    });

    view! {
        <section class="screen livreurs">
            <header class="screen-header">
                <h1>"Delivery"</h1>
                <div class="stats">
                    {AVAILABILITY
                        .iter()
                        .map(|a| {
                            view! {
                                <span class=format!("badge availability-{}", a)>
                                    {move || format!("{} {}", list.state.with(|c| c.stat(a)), a)}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>
            </header>
            <div class="toolbar">
                <SearchBox
                    placeholder="Search name, phone or zone"
                    on_commit=move |term: String| list.change(|c| c.set_search(&term))
                />
                <FilterSelect
                    label="Availability"
                    options=AVAILABILITY
                    value=availability_filter
                    on_change=move |v: String| list.change(|c| c.set_filter("availability", &v))
                />
                <button class="btn btn-primary" on:click=move |_| modal.update(|m| m.open_add())>"Add courier"</button>
            </div>
            <ListStatus list=list empty="No couriers" />
            <table class="data-table">
                <thead>
                    <tr>
                        <th on:click=move |_| list.change(|c| c.sort_by("name"))>"Name"</th>
                        <th>"Phone"</th>
                        <th>"Vehicle"</th>
                        <th on:click=move |_| list.change(|c| c.sort_by("zone"))>"Zone"</th>
                        <th on:click=move |_| list.change(|c| c.sort_by("deliveriesCount"))>"Deliveries"</th>
                        <th>"Availability"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.state.with(|c| c.items().to_vec())
                        key=|l| (l.id.clone(), l.name.clone(), l.availability.clone(), l.is_active)
                        children=move |livreur| {
                            let edit = livreur.clone();
                            let availability_id = livreur.id.clone();
                            let delete_id = livreur.id.clone();
                            view! {
                                <tr class:inactive={!livreur.is_active}>
                                    <td>{livreur.name.clone()}</td>
                                    <td>{livreur.phone.clone()}</td>
                                    <td>{livreur.vehicle_type.clone()}</td>
                                    <td>{livreur.zone.clone()}</td>
                                    <td>{livreur.deliveries_count}</td>
                                    <td>
                                        <select
                                            prop:value=livreur.availability.clone()
                                            on:change=move |ev| {
                                                set_availability(availability_id.clone(), event_target_value(&ev))
                                            }
                                        >
                                            {AVAILABILITY
                                                .iter()
                                                .map(|a| view! { <option value=*a>{*a}</option> })
                                                .collect_view()}
                                        </select>
                                    </td>
                                    <td class="actions">
                                        <button
                                            class="btn"
                                            on:click=move |_| {
                                                modal.update(|m| m.open_edit(&edit.id, LivreurForm::from_livreur(&edit)))
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
                <LivreurFormModal modal=modal on_saved=move |_| list.refetch() />
            </Show>
        </section>
    }
}

#[component]
fn LivreurFormModal(modal: RwSignal<Modal<LivreurForm>>, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let editing = modal.with_untracked(|m| m.editing_id().is_some());

    let text = move |f: fn(&LivreurForm) -> String| Signal::derive(move || modal.with(|m| f(m.form())));
    let on_field = move |(name, raw): (String, String)| {
        modal.update(|m| {
            let form = m.form_mut();
            match name.as_str() {
                "name" => form.name = raw,
                "email" => form.email = raw.trim().to_string(),
                "phone" => form.phone = raw.trim().to_string(),
                "vehicleType" => form.vehicle_type = raw,
                "zone" => form.zone = raw,
                "password" => form.password = raw,
                "isActive" => form.is_active = raw == "true",
                _ => {}
            }
        });
    };

    view! {
        <ModalShell
            title={if editing { "Edit courier" } else { "Add courier" }.to_string()}
            error=Signal::derive(move || modal.with(|m| m.error().map(str::to_string)))
            submitting=Signal::derive(move || modal.with(|m| m.is_submitting()))
            on_close=move |_| modal.update(|m| m.close())
            on_submit=move |_| submit_modal(ctx, modal, move |_| on_saved.run(()))
        >
            <Field label="Name" name="name" value=text(|f| f.name.clone()) on_input=on_field />
            <div class="form-row">
                <Field label="Email" name="email" kind="email" value=text(|f| f.email.clone()) on_input=on_field />
                <Field label="Phone" name="phone" kind="tel" value=text(|f| f.phone.clone()) on_input=on_field />
            </div>
            <div class="form-row">
                <label class="form-field">
                    <span class="field-label">"Vehicle"</span>
                    <select
                        name="vehicleType"
                        prop:value=move || modal.with(|m| m.form().vehicle_type.clone())
                        on:change=move |ev| on_field(("vehicleType".to_string(), event_target_value(&ev)))
                    >
                        {VEHICLE_TYPES.iter().map(|v| view! { <option value=*v>{*v}</option> }).collect_view()}
                    </select>
                </label>
                <Field label="Zone" name="zone" value=text(|f| f.zone.clone()) on_input=on_field />
            </div>
            <Field
                label={if editing { "New password (optional)" } else { "Password" }}
                name="password"
                kind="password"
                value=text(|f| f.password.clone())
                on_input=on_field
            />
            <CheckField
                label="Active"
                name="isActive"
                checked=Signal::derive(move || modal.with(|m| m.form().is_active))
                on_input=on_field
            />
        </ModalShell>
    }
}
