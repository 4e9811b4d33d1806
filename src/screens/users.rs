//! Users Screen

use leptos::prelude::*;

use crate::api::users::{self, Users};
use crate::components::{spawn_action, use_list, DeleteConfirmButton, FilterSelect, ListStatus, Pagination, SearchBox};
use crate::context::use_app_context;
use crate::list::ListQuery;
use crate::models::User;

const ROLES: &[&str] = &["customer", "vendor", "admin"];

#[component]
pub fn UsersScreen() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(Users, ListQuery::new(ctx.config().default_page_size).sorted());

    let toggle_block = move |user: User| {
        let blocked = !user.is_blocked;
        let id = user.id.clone();
        list.patch_local(|c| {
            c.patch(&id, |u| u.is_blocked = blocked);
        });
        spawn_action(
            ctx,
            async move {
                let result = users::set_blocked(&ctx.client(), &id, blocked).await;
                if result.is_err() {
                    list.patch_local(|c| {
                        c.patch(&id, |u| u.is_blocked = !blocked);
                    });
                }
                result
            },
            |_| (),
        );
    };

    let change_role = move |id: String, role: String| {
        spawn_action(ctx, async move { users::update_role(&ctx.client(), &id, &role).await }, move |_| {
            list.refetch()
        });
    };

    let remove = move |id: String| {
        spawn_action(ctx, async move { users::delete(&ctx.client(), &id).await }, move |_| list.refetch());
    };

    let role_filter = Signal::derive(move || {
        list.state.with(|c| c.query().filters.get("role").unwrap_or("").to_string())
    });

    view! {
        <section class="screen users">
            <header class="screen-header">
                <h1>"Users"</h1>
                <div class="stats">
                    <span>{move || format!("{} total", list.state.with(|c| c.total()))}</span>
                    <span>{move || format!("{} blocked", list.state.with(|c| c.stat("blocked")))}</span>
                </div>
            </header>
            <div class="toolbar">
                <SearchBox
                    placeholder="Search name or email"
                    on_commit=move |term: String| list.change(|c| c.set_search(&term))
                />
                <FilterSelect
                    label="Role"
                    options=ROLES
                    value=role_filter
                    on_change=move |v: String| list.change(|c| c.set_filter("role", &v))
                />
            </div>
            <ListStatus list=list empty="No users match" />
            <table class="data-table">
                <thead>
                    <tr>
                        <th on:click=move |_| list.change(|c| c.sort_by("name"))>"Name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th on:click=move |_| list.change(|c| c.sort_by("createdAt"))>"Joined"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || list.state.with(|c| c.items().to_vec())
                        key=|u| (u.id.clone(), u.role.clone(), u.is_blocked)
                        children=move |user| {
                            let row = user.clone();
                            let role_id = user.id.clone();
                            let delete_id = user.id.clone();
                            let blocked = user.is_blocked;
                            let current_role = user.role.clone();
                            view! {
                                <tr class:blocked=blocked data-id=user.id.clone()>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>
                                        <select
                                            prop:value=current_role
                                            on:change=move |ev| change_role(role_id.clone(), event_target_value(&ev))
                                        >
                                            {ROLES.iter().map(|r| view! { <option value=*r>{*r}</option> }).collect_view()}
                                        </select>
                                    </td>
                                    <td>{user.created_at.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()}</td>
                                    <td class="actions">
                                        <button class="btn" on:click=move |_| toggle_block(row.clone())>
                                            {if blocked { "Unblock" } else { "Block" }}
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
        </section>
    }
}
