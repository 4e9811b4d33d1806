//! Categories Screen
//!
//! The whole hierarchy is loaded into the catalog store; the tree,
//! expansion state and parent choices are all derived locally from it.
//! Creating, editing or deleting reloads the hierarchy from the server.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::categories;
use crate::components::{spawn_action, submit_modal, CheckField, DeleteConfirmButton, Field, ModalShell, TagInput};
use crate::context::{use_app_context, AppContext};
use crate::error::ApiResult;
use crate::forms::{CategoryForm, Modal};
use crate::store::{
    store_begin_category_load, store_finish_category_load, store_update_category, use_catalog_store,
    CatalogStateStoreFields, CatalogStore,
};
use crate::tree::{CategoryTree, ExpandedSet, TreeRow};

/// Load every category into the store. `on_done` runs with the count only
/// when no newer load was started meanwhile.
pub fn load_categories(ctx: AppContext, store: CatalogStore, on_done: impl FnOnce(ApiResult<usize>) + 'static) {
    let generation = store_begin_category_load(&store);
    spawn_local(async move {
        match categories::list_all(&ctx.client()).await {
            Ok(all) => {
                let count = all.len();
                if store_finish_category_load(&store, generation, all) {
                    on_done(Ok(count));
                }
            }
            Err(e) => {
                if store.category_loads().with_untracked(|loads| loads.is_current(generation)) {
                    on_done(Err(e));
                }
            }
        }
    });
}

#[component]
pub fn CategoriesScreen() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_catalog_store();
    let expanded = RwSignal::new(ExpandedSet::default());
    let modal = RwSignal::new(Modal::<CategoryForm>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let version = RwSignal::new(0u32);

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        version.track();
        load_categories(ctx, store, move |result| match result {
            Ok(count) => {
                log::debug!("[CATEGORIES] Loaded {} categories", count);
                set_error.set(None);
            }
            Err(e) => {
                log::error!("[CATEGORIES] Failed to load: {}", e);
                set_error.set(Some(e.user_message()));
            }
        });
    });
    let reload = move || version.update(|v| *v += 1);

    let tree = Memo::new(move |_| CategoryTree::new(store.categories().get()).visible_rows(&expanded.get()));

    let expand_all = move |_| {
        let tree = CategoryTree::new(store.categories().get_untracked());
        expanded.update(|set| set.expand_all(&tree));
    };

    view! {
        <section class="screen categories">
            <header class="screen-header">
                <h1>"Categories"</h1>
                <div class="stats">
                    <span>{move || format!("{} categories", store.categories().with(|c| c.len()))}</span>
                </div>
            </header>
            <div class="toolbar">
                <button class="btn" on:click=expand_all>"Expand all"</button>
                <button class="btn" on:click=move |_| expanded.update(|set| set.collapse_all())>"Collapse all"</button>
                <button class="btn btn-primary" on:click=move |_| modal.update(|m| m.open_add())>"Add category"</button>
            </div>
            {move || error.get().map(|e| view! { <div class="list-error">{e}</div> })}
            <div class="category-tree">
                <For
                    each=move || tree.get()
                    key=|row| {
                        (
                            row.category.id.clone(),
                            row.category.name.clone(),
                            row.category.is_active,
                            row.depth,
                            row.has_children,
                        )
                    }
                    children=move |row| {
                        view! { <CategoryRow row=row expanded=expanded modal=modal on_changed=move |_| reload() /> }
                    }
                />
            </div>
            <Show when=move || modal.with(|m| m.is_open())>
                <CategoryFormModal modal=modal on_saved=move |_| reload() />
            </Show>
        </section>
    }
}

/// A single category row in the tree
#[component]
fn CategoryRow(
    row: TreeRow,
    expanded: RwSignal<ExpandedSet>,
    modal: RwSignal<Modal<CategoryForm>>,
    #[prop(into)] on_changed: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_catalog_store();

    let category = row.category;
    let id = category.id.clone();
    let is_active = category.is_active;
    let indent = row.depth * 24;

    let toggle_id = id.clone();
    let child_id = id.clone();
    let active_id = id.clone();
    let delete_id = id.clone();
    let tree_id = id.clone();
    let edit = category.clone();

    let toggle_active = move |_| {
        let id = active_id.clone();
        let call_id = id.clone();
        spawn_action(
            ctx,
            async move { categories::set_active(&ctx.client(), &call_id, !is_active).await },
            move |_| {
                let existing = store.categories().with_untracked(|all| all.iter().find(|c| c.id == id).cloned());
                if let Some(mut updated) = existing {
                    updated.is_active = !is_active;
                    store_update_category(&store, updated);
                }
            },
        );
    };

    // What happens to the children is up to the server; reload to see it
    let remove = move |id: String, with_children: bool| {
        spawn_action(
            ctx,
            async move { categories::delete(&ctx.client(), &id, with_children).await },
            move |_| on_changed.run(()),
        );
    };

    view! {
        <div class={if is_active { "tree-row" } else { "tree-row inactive" }} style=format!("margin-left: {}px;", indent)>
            {if row.has_children {
                view! {
                    <button class="collapse-btn" on:click=move |_| {
                        expanded.update(|set| {
                            set.toggle(&toggle_id);
                        });
                    }>
                        {
                            let id = id.clone();
                            move || if expanded.with(|set| set.contains(&id)) { "▼" } else { "▶" }
                        }
                    </button>
                }.into_any()
            } else {
                view! { <span class="collapse-placeholder">"·"</span> }.into_any()
            }}
            <span class="tree-name">{category.name.clone()}</span>
            {(!is_active).then(|| view! { <span class="badge">"inactive"</span> })}
            <div class="actions">
                <button
                    class="btn-small"
                    title="Add subcategory"
                    on:click=move |_| modal.update(|m| m.open_add_with(CategoryForm::child_of(&child_id)))
                >
                    "+"
                </button>
                <button
                    class="btn-small"
                    on:click=move |_| modal.update(|m| m.open_edit(&edit.id, CategoryForm::from_category(&edit)))
                >
                    "Edit"
                </button>
                <button class="btn-small" on:click=toggle_active>
                    {if is_active { "Deactivate" } else { "Activate" }}
                </button>
                <DeleteConfirmButton
                    button_class="btn-small btn-danger"
                    prompt={if row.has_children { "Delete, keeping subcategories?" } else { "Delete?" }}
                    on_confirm=move |_| remove(delete_id.clone(), false)
                />
                {row.has_children.then(|| {
                    view! {
                        <DeleteConfirmButton
                            button_class="btn-small btn-danger"
                            label="Delete tree"
                            prompt="Delete with all subcategories?"
                            on_confirm=move |_| remove(tree_id.clone(), true)
                        />
                    }
                })}
            </div>
        </div>
    }
}

#[component]
fn CategoryFormModal(modal: RwSignal<Modal<CategoryForm>>, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_catalog_store();

    let title = Signal::derive(move || {
        if modal.with(|m| m.editing_id().is_some()) { "Edit category" } else { "Add category" }.to_string()
    });

    let on_field = move |(name, raw): (String, String)| {
        modal.update(|m| {
            let form = m.form_mut();
            match name.as_str() {
                "name" => form.name = raw,
                "description" => form.description = raw,
                "isActive" => form.is_active = raw == "true",
                _ => {}
            }
        });
    };

    // Self and descendants are never offered as a parent
    let parent_options = move || {
        let editing = modal.with(|m| m.editing_id().map(str::to_string));
        let tree = CategoryTree::new(store.categories().get());
        tree.parent_candidates(editing.as_deref())
            .into_iter()
            .map(|c| (c.id.clone(), tree.path_label(&c.id)))
            .collect::<Vec<_>>()
    };

    view! {
        <ModalShell
            title=title
            error=Signal::derive(move || modal.with(|m| m.error().map(str::to_string)))
            submitting=Signal::derive(move || modal.with(|m| m.is_submitting()))
            on_close=move |_| modal.update(|m| m.close())
            on_submit=move |_| submit_modal(ctx, modal, move |_| on_saved.run(()))
        >
            <Field
                label="Name"
                name="name"
                value=Signal::derive(move || modal.with(|m| m.form().name.clone()))
                on_input=on_field
            />
            <Field
                label="Description"
                name="description"
                value=Signal::derive(move || modal.with(|m| m.form().description.clone()))
                on_input=on_field
            />
            <label class="form-field">
                <span class="field-label">"Parent"</span>
                <select
                    name="parent"
                    prop:value=move || modal.with(|m| m.form().parent_id.clone().unwrap_or_default())
                    on:change=move |ev| modal.update(|m| m.form_mut().set_parent(&event_target_value(&ev)))
                >
                    <option value="">"(top level)"</option>
                    {move || {
                        parent_options()
                            .into_iter()
                            .map(|(id, label)| view! { <option value=id>{label}</option> })
                            .collect_view()
                    }}
                </select>
            </label>
            <CheckField
                label="Active"
                name="isActive"
                checked=Signal::derive(move || modal.with(|m| m.form().is_active))
                on_input=on_field
            />
            <fieldset>
                <legend>"Attributes"</legend>
                <TagInput
                    tags=Signal::derive(move || modal.with(|m| m.form().attributes.clone()))
                    on_change=move |attributes| modal.update(|m| m.form_mut().attributes = attributes)
                    placeholder="Add attribute"
                />
            </fieldset>
        </ModalShell>
    }
}
