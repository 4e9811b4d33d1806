//! Categories Gateway
//!
//! The tree screen loads every category at once and builds the hierarchy
//! locally, so there is no paginated list here.

use serde_json::json;

use super::{ack, decode_keyed, decode_page, item_path};
use crate::error::ApiResult;
use crate::forms::{CategoryForm, Persist};
use crate::http::{ApiClient, QueryParams};
use crate::models::Category;

const BASE: &str = "categories";

pub async fn list_all(client: &ApiClient) -> ApiResult<Vec<Category>> {
    let params = QueryParams::new().with("all", true);
    Ok(decode_page(client.get(BASE, params).await?, "categories")?.items)
}

pub async fn create(client: &ApiClient, form: &CategoryForm) -> ApiResult<Category> {
    decode_keyed(client.post(BASE, form).await?, "category")
}

pub async fn update(client: &ApiClient, id: &str, form: &CategoryForm) -> ApiResult<Category> {
    decode_keyed(client.put(&item_path(BASE, id), form).await?, "category")
}

/// With `with_children` the backend removes the whole subtree. Either way the
/// caller reloads the hierarchy to see where the children ended up.
pub async fn delete(client: &ApiClient, id: &str, with_children: bool) -> ApiResult<()> {
    let mut params = QueryParams::new();
    if with_children {
        params.set("deleteChildren", true);
    }
    ack(client.delete(&item_path(BASE, id), params).await?)
}

pub async fn set_active(client: &ApiClient, id: &str, is_active: bool) -> ApiResult<()> {
    let path = format!("{}/status", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "isActive": is_active })).await?)
}

#[async_trait::async_trait(?Send)]
impl Persist for CategoryForm {
    type Saved = Category;

    async fn create(&self, client: &ApiClient) -> ApiResult<Category> {
        create(client, self).await
    }

    async fn update(&self, client: &ApiClient, id: &str) -> ApiResult<Category> {
        update(client, id, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{submit, Modal, SubmitOutcome};
    use crate::http::testing::client;
    use crate::http::Method;
    use crate::tree::CategoryTree;
    use futures::executor::block_on;

    #[test]
    fn test_empty_name_sends_nothing() {
        let (api, transport) = client(Some("t"));
        let mut modal = Modal::<CategoryForm>::new();
        modal.open_add();
        modal.form_mut().name = "  ".into();

        assert!(block_on(submit(&api, &mut modal)).is_none());
        assert_eq!(transport.count(), 0);
        assert_eq!(modal.error(), Some("name required"));
        assert!(modal.is_open());
    }

    #[test]
    fn test_add_child_then_reload_tree() {
        let (api, transport) = client(Some("t"));
        transport.push_json(201, json!({"success": true, "data": {"_id": "c3", "name": "Laptops", "parent": "c1"}}));

        let mut modal = Modal::<CategoryForm>::new();
        modal.open_edit("c1", CategoryForm::default());
        modal.open_add();
        *modal.form_mut() = CategoryForm::child_of("c1");
        modal.form_mut().name = "Laptops".into();

        let outcome = block_on(submit(&api, &mut modal)).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Saved(ref c) if c.parent_id.as_deref() == Some("c1")));
        assert_eq!(transport.last().url, "http://localhost:5000/api/categories");

        transport.push_json(200, json!({"success": true, "data": [
            {"_id": "c1", "name": "Electronics"},
            {"_id": "c3", "name": "Laptops", "parent": "c1"}
        ]}));
        let tree = CategoryTree::new(block_on(list_all(&api)).unwrap());
        assert_eq!(tree.path_label("c3"), "Electronics / Laptops");
        assert_eq!(transport.last().url, "http://localhost:5000/api/categories?all=true");
    }

    #[test]
    fn test_delete_with_children_flag() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true})).push_json(200, json!({"success": true}));

        block_on(delete(&api, "c1", true)).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/categories/c1?deleteChildren=true");
        assert_eq!(transport.last().method, Method::Delete);

        block_on(delete(&api, "c1", false)).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/categories/c1");
    }

    #[test]
    fn test_plain_delete_then_reload_shows_server_tree() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true}));
        // Computers (c2) is gone and the server re-attached Laptops to Electronics
        transport.push_json(200, json!({"success": true, "data": [
            {"_id": "c1", "name": "Electronics"},
            {"_id": "c3", "name": "Laptops", "parent": {"_id": "c1", "name": "Electronics"}}
        ]}));

        block_on(delete(&api, "c2", false)).unwrap();
        let tree = CategoryTree::new(block_on(list_all(&api)).unwrap());

        assert_eq!(transport.count(), 2);
        assert!(tree.get("c2").is_none());
        assert_eq!(tree.path_label("c3"), "Electronics / Laptops");
        assert_eq!(tree.children_of(Some("c1")).len(), 1);
    }

    #[test]
    fn test_toggle_active() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true}));
        block_on(set_active(&api, "c2", false)).unwrap();
        assert_eq!(transport.last().body.as_deref(), Some(r#"{"isActive":false}"#));
    }
}
