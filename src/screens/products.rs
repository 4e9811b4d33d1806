//! Products Screen
//!
//! Paginated catalog with the add/edit modal, plus the featured board that
//! moves products between "featured" and "available" without a refetch.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{products, products::Products};
use crate::components::{
    spawn_action, submit_modal, use_list, CheckField, DeleteConfirmButton, Field, FilterSelect, ImageEditor,
    ListStatus, ModalShell, Pagination, SearchBox, SpecEditor, TagInput,
};
use crate::context::{use_app_context, AppContext};
use crate::forms::{Modal, ProductForm};
use crate::http::QueryParams;
use crate::list::ListQuery;
use crate::models::Product;
use crate::store::{
    store_set_board, store_toggle_featured, use_catalog_store, CatalogStateStoreFields,
    CatalogStore,
};
use crate::tree::{CategoryTree, ExpandedSet};

use super::categories::load_categories;

const PRODUCT_STATUSES: &[&str] = &["pending", "approved", "rejected"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Catalog,
    Featured,
}

#[component]
pub fn ProductsScreen() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_catalog_store();
    let (tab, set_tab) = signal(Tab::Catalog);

    // Category options for the product form
    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_categories(ctx, store, |result| {
            if let Err(e) = result {
                log::warn!("[PRODUCTS] Could not load categories: {}", e);
            }
        });
    });

    view! {
        <section class="screen products">
            <header class="screen-header">
                <h1>"Products"</h1>
                <div class="tabs">
                    <button class:active=move || tab.get() == Tab::Catalog on:click=move |_| set_tab.set(Tab::Catalog)>
                        "Catalog"
                    </button>
                    <button class:active=move || tab.get() == Tab::Featured on:click=move |_| set_tab.set(Tab::Featured)>
                        "Featured"
                    </button>
                </div>
            </header>
            {move || match tab.get() {
                Tab::Catalog => view! { <CatalogTab /> }.into_any(),
                Tab::Featured => view! { <FeaturedBoardTab /> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn CatalogTab() -> impl IntoView {
    let ctx = use_app_context();
    let list = use_list(Products, ListQuery::new(ctx.config().default_page_size).sorted());
    let modal = RwSignal::new(Modal::<ProductForm>::new());

    let open_edit = move |product: Product| {
        modal.update(|m| m.open_edit(&product.id, ProductForm::from_product(&product)));
    };

    let set_status = move |id: String, status: String| {
        spawn_action(
            ctx,
            async move { products::update_status(&ctx.client(), &id, &status).await },
            move |_| list.refetch(),
        );
    };

    let remove = move |id: String| {
        spawn_action(ctx, async move { products::delete(&ctx.client(), &id).await }, move |_| list.refetch());
    };

    let status_filter = Signal::derive(move || {
        list.state.with(|c| c.query().filters.get("status").unwrap_or("").to_string())
    });

    view! {
        <div class="toolbar">
            <SearchBox
                placeholder="Search products"
                value=Signal::derive(move || list.state.with(|c| c.query().search.clone()))
                on_commit=move |term: String| list.change(|c| c.set_search(&term))
            />
            <FilterSelect
                label="Status"
                options=PRODUCT_STATUSES
                value=status_filter
                on_change=move |v: String| list.change(|c| c.set_filter("status", &v))
            />
            <button class="btn" on:click=move |_| list.change(|c| c.clear_filters())>"Reset"</button>
            <button class="btn btn-primary" on:click=move |_| modal.update(|m| m.open_add())>"Add product"</button>
        </div>
        <ListStatus list=list empty="No products" />
        <table class="data-table">
            <thead>
                <tr>
                    <th></th>
                    <th on:click=move |_| list.change(|c| c.sort_by("name"))>"Name"</th>
                    <th>"Vendor"</th>
                    <th on:click=move |_| list.change(|c| c.sort_by("price"))>"Price"</th>
                    <th on:click=move |_| list.change(|c| c.sort_by("stock"))>"Stock"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || list.state.with(|c| c.items().to_vec())
                    key=|p| (p.id.clone(), p.name.clone(), p.status.clone(), p.price.to_bits(), p.stock, p.featured)
                    children=move |product| {
                        let edit = product.clone();
                        let status_id = product.id.clone();
                        let delete_id = product.id.clone();
                        view! {
                            <tr>
                                <td>
                                    {product.primary_image().map(|src| view! { <img class="thumb" src=src.to_string() /> })}
                                </td>
                                <td>
                                    {product.name.clone()}
                                    {product.featured.then(|| view! { <span class="badge">"★"</span> })}
                                </td>
                                <td>{product.vendor.as_ref().map(|v| v.name.clone()).unwrap_or_default()}</td>
                                <td>{format!("{:.2}", product.price)}</td>
                                <td>{product.stock}</td>
                                <td>
                                    <select
                                        prop:value=product.status.clone()
                                        on:change=move |ev| set_status(status_id.clone(), event_target_value(&ev))
                                    >
                                        {PRODUCT_STATUSES
                                            .iter()
                                            .map(|s| view! { <option value=*s>{*s}</option> })
                                            .collect_view()}
                                    </select>
                                </td>
                                <td class="actions">
                                    <button class="btn" on:click=move |_| open_edit(edit.clone())>"Edit"</button>
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
            <ProductFormModal modal=modal on_saved=move |_| list.refetch() />
        </Show>
    }
}

#[component]
fn ProductFormModal(modal: RwSignal<Modal<ProductForm>>, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_catalog_store();

    let title = Signal::derive(move || {
        if modal.with(|m| m.editing_id().is_some()) { "Edit product" } else { "Add product" }.to_string()
    });
    let text = move |f: fn(&ProductForm) -> String| Signal::derive(move || modal.with(|m| f(m.form())));
    let flag = move |f: fn(&ProductForm) -> bool| Signal::derive(move || modal.with(|m| f(m.form())));

    let on_field = move |(path, raw): (String, String)| {
        modal.update(|m| {
            if let Err(e) = m.form_mut().set_path(&path, &raw) {
                m.set_error(e.to_string());
            }
        });
    };

    let category_options = move || {
        let tree = CategoryTree::new(store.categories().get());
        tree.visible_rows(&ExpandedSet::all(&tree))
            .into_iter()
            .map(|row| (row.category.id.clone(), format!("{}{}", "\u{a0}\u{a0}".repeat(row.depth), row.category.name)))
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
            <Field label="Name" name="name" value=text(|f| f.name.clone()) on_input=on_field />
            <label class="form-field">
                <span class="field-label">"Description"</span>
                <textarea
                    name="description"
                    prop:value=move || modal.with(|m| m.form().description.clone())
                    on:input=move |ev| on_field(("description".to_string(), event_target_value(&ev)))
                ></textarea>
            </label>
            <div class="form-row">
                <Field label="Price" name="price" kind="number" value=text(|f| f.price.to_string()) on_input=on_field />
                <Field label="Stock" name="stock" kind="number" value=text(|f| f.stock.to_string()) on_input=on_field />
                <Field label="SKU" name="sku" value=text(|f| f.sku.clone()) on_input=on_field />
                <Field label="Brand" name="brand" value=text(|f| f.brand.clone()) on_input=on_field />
            </div>
            <label class="form-field">
                <span class="field-label">"Category"</span>
                <select
                    name="category"
                    prop:value=move || modal.with(|m| m.form().category_id.clone())
                    on:change=move |ev| on_field(("category".to_string(), event_target_value(&ev)))
                >
                    <option value="">"Select a category"</option>
                    {move || {
                        category_options()
                            .into_iter()
                            .map(|(id, label)| view! { <option value=id>{label}</option> })
                            .collect_view()
                    }}
                </select>
            </label>
            <CheckField label="Featured" name="featured" checked=flag(|f| f.featured) on_input=on_field />

            <fieldset>
                <legend>"Shipping"</legend>
                <div class="form-row">
                    <Field label="Weight (kg)" name="shipping.weight" kind="number"
                        value=text(|f| f.shipping.weight.to_string()) on_input=on_field />
                    <Field label="Length" name="shipping.dimensions.length" kind="number"
                        value=text(|f| f.shipping.dimensions.length.to_string()) on_input=on_field />
                    <Field label="Width" name="shipping.dimensions.width" kind="number"
                        value=text(|f| f.shipping.dimensions.width.to_string()) on_input=on_field />
                    <Field label="Height" name="shipping.dimensions.height" kind="number"
                        value=text(|f| f.shipping.dimensions.height.to_string()) on_input=on_field />
                </div>
                <CheckField label="Free shipping" name="shipping.freeShipping"
                    checked=flag(|f| f.shipping.free_shipping) on_input=on_field />
            </fieldset>

            <fieldset>
                <legend>"Discount"</legend>
                <div class="form-row">
                    <Field label="Percentage" name="discount.percentage" kind="number"
                        value=text(|f| f.discount.percentage.to_string()) on_input=on_field />
                    <Field label="Starts" name="discount.startDate" kind="date"
                        value=text(|f| f.discount.start_date.clone()) on_input=on_field />
                    <Field label="Ends" name="discount.endDate" kind="date"
                        value=text(|f| f.discount.end_date.clone()) on_input=on_field />
                </div>
            </fieldset>

            <fieldset>
                <legend>"Tags"</legend>
                <TagInput
                    tags=Signal::derive(move || modal.with(|m| m.form().tags.clone()))
                    on_change=move |tags| modal.update(|m| m.form_mut().tags = tags)
                />
            </fieldset>
            <fieldset>
                <legend>"Specifications"</legend>
                <SpecEditor
                    specs=Signal::derive(move || modal.with(|m| m.form().specifications.clone()))
                    on_change=move |specs| modal.update(|m| m.form_mut().specifications = specs)
                />
            </fieldset>
            <fieldset>
                <legend>"Images"</legend>
                <ImageEditor
                    images=Signal::derive(move || modal.with(|m| m.form().images.clone()))
                    on_change=move |images| modal.update(|m| m.form_mut().images = images)
                />
            </fieldset>
        </ModalShell>
    }
}

/// Featured products plus up to a hundred of the rest
fn load_board(ctx: AppContext, store: CatalogStore) {
    spawn_local(async move {
        let client = ctx.client();
        let featured = match products::list_featured(&client).await {
            Ok(featured) => featured,
            Err(e) => return ctx.notify(e.user_message()),
        };
        let params = QueryParams::new().with("featured", false).with("limit", 100);
        match products::list(&client, params).await {
            Ok(page) => {
                let rest = page.items.into_iter().filter(|p| !featured.iter().any(|f| f.id == p.id));
                let board = featured
                    .iter()
                    .cloned()
                    .map(|mut p| {
                        p.featured = true;
                        p
                    })
                    .chain(rest)
                    .collect();
                store_set_board(&store, board);
            }
            Err(e) => ctx.notify(e.user_message()),
        }
    });
}

#[component]
fn FeaturedBoardTab() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_catalog_store();

    Effect::new(move |_| {
        ctx.reload_trigger.track();
        load_board(ctx, store);
    });

    let toggle = move |id: String| {
        let Some(featured) = store_toggle_featured(&store, &id) else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = products::set_featured(&ctx.client(), &id, featured).await {
                log::error!("[PRODUCTS] Featured toggle failed for {}: {}", id, e);
                store_toggle_featured(&store, &id);
                ctx.notify(e.user_message());
            }
        });
    };

    let column = move |title: &'static str, featured: bool| {
        let items = move || {
            store.board().with(|b| if featured { b.featured.clone() } else { b.available.clone() })
        };
        view! {
            <div class="board-column">
                <h3>{title} " (" {move || items().len()} ")"</h3>
                <For
                    each=items
                    key=|p| (p.id.clone(), p.featured)
                    children=move |product| {
                        let id = product.id.clone();
                        view! {
                            <div class="board-card">
                                {product.primary_image().map(|src| view! { <img class="thumb" src=src.to_string() /> })}
                                <span>{product.name.clone()}</span>
                                <button class="btn" on:click=move |_| toggle(id.clone())>
                                    {if featured { "Unfeature" } else { "Feature" }}
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        }
    };

    view! {
        <div class="featured-board">
            {column("Featured", true)}
            {column("Available", false)}
        </div>
    }
}
