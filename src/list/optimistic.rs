//! Optimistic Moves
//!
//! Helpers for screens that show the same records split over two lists and
//! move a row across on a toggle, without waiting for a refetch.

use crate::models::{Entity, Product};

/// Move the row with `id` from `from` to the front of `to`, applying `f` to
/// it on the way. Returns false if the row was not in `from`.
pub fn move_between<T: Entity>(from: &mut Vec<T>, to: &mut Vec<T>, id: &str, f: impl FnOnce(&mut T)) -> bool {
    let Some(pos) = from.iter().position(|item| item.id() == id) else {
        return false;
    };
    let mut item = from.remove(pos);
    f(&mut item);
    to.retain(|existing| existing.id() != id);
    to.insert(0, item);
    true
}

/// Featured products on one side, everything else on the other
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedBoard {
    pub featured: Vec<Product>,
    pub available: Vec<Product>,
}

impl FeaturedBoard {
    /// Split a full product list by its `featured` flag
    pub fn from_products(products: Vec<Product>) -> Self {
        let (featured, available) = products.into_iter().partition(|p| p.featured);
        Self { featured, available }
    }

    /// Flip `featured` on `id` and move it across. Returns the new flag.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if move_between(&mut self.featured, &mut self.available, id, |p| p.featured = false) {
            return Some(false);
        }
        if move_between(&mut self.available, &mut self.featured, id, |p| p.featured = true) {
            return Some(true);
        }
        None
    }

    /// Same membership regardless of order
    pub fn agrees_with(&self, other: &FeaturedBoard) -> bool {
        fn ids(list: &[Product]) -> Vec<&str> {
            let mut ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
            ids.sort_unstable();
            ids
        }
        ids(&self.featured) == ids(&other.featured) && ids(&self.available) == ids(&other.available)
    }
}
