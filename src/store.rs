//! Catalog State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity on the data that
//! several screens read: the category list and the featured board.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::list::{FeaturedBoard, Generation};
use crate::models::{Category, Product};

/// Shared catalog state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct CatalogState {
    /// Flat category list; the tree is rebuilt from it on render
    pub categories: Vec<Category>,
    /// Overlapping category loads; only the newest is applied
    pub category_loads: Generation,
    /// Featured products vs. the rest
    pub board: FeaturedBoard,
    /// Version counter, bumped after the board was confirmed by a refetch
    pub board_version: u32,
}

/// Type alias for the store
pub type CatalogStore = Store<CatalogState>;

/// Get the catalog store from context
pub fn use_catalog_store() -> CatalogStore {
    expect_context::<CatalogStore>()
}

// ========================
// Store Helper Functions
// ========================

fn store_set_categories(store: &CatalogStore, categories: Vec<Category>) {
    *store.categories().write() = categories;
}

/// Start a category load; returns its generation
pub fn store_begin_category_load(store: &CatalogStore) -> u64 {
    let field = store.category_loads();
    let mut loads = field.write_untracked();
    loads.issue()
}

/// Apply a loaded category list unless a newer load started since
pub fn store_finish_category_load(store: &CatalogStore, generation: u64, categories: Vec<Category>) -> bool {
    if !store.category_loads().with_untracked(|loads| loads.is_current(generation)) {
        log::debug!("[STORE] Dropping stale category load #{}", generation);
        return false;
    }
    store_set_categories(store, categories);
    true
}

/// Update a category in the store by ID
pub fn store_update_category(store: &CatalogStore, updated: Category) {
    let field = store.categories();
    let mut categories = field.write();
    match categories.iter_mut().find(|c| c.id == updated.id) {
        Some(existing) => *existing = updated,
        None => categories.push(updated),
    }
}

pub fn store_set_board(store: &CatalogStore, products: Vec<Product>) {
    *store.board().write() = FeaturedBoard::from_products(products);
    *store.board_version().write() += 1;
}

/// Optimistically move a product across the board; returns the new flag
pub fn store_toggle_featured(store: &CatalogStore, id: &str) -> Option<bool> {
    store.board().write().toggle(id)
}
