//! Moderators Gateway

use async_trait::async_trait;
use serde_json::json;

use super::{ack, decode_keyed, decode_page, item_path, Page};
use crate::error::ApiResult;
use crate::forms::{ModeratorForm, Persist};
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::models::Moderator;

const BASE: &str = "admin/moderators";

pub async fn list(client: &ApiClient, params: QueryParams) -> ApiResult<Page<Moderator>> {
    decode_page(client.get(BASE, params).await?, "moderators")
}

pub async fn create(client: &ApiClient, form: &ModeratorForm) -> ApiResult<Moderator> {
    decode_keyed(client.post(BASE, form).await?, "moderator")
}

pub async fn update(client: &ApiClient, id: &str, form: &ModeratorForm) -> ApiResult<Moderator> {
    decode_keyed(client.put(&item_path(BASE, id), form).await?, "moderator")
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<()> {
    ack(client.delete(&item_path(BASE, id), QueryParams::new()).await?)
}

pub async fn set_active(client: &ApiClient, id: &str, is_active: bool) -> ApiResult<()> {
    let path = format!("{}/status", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "isActive": is_active })).await?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Moderators;

#[async_trait(?Send)]
impl ListResource for Moderators {
    type Item = Moderator;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Moderator>> {
        list(client, query.to_params()).await
    }
}

#[async_trait(?Send)]
impl Persist for ModeratorForm {
    type Saved = Moderator;

    async fn create(&self, client: &ApiClient) -> ApiResult<Moderator> {
        create(client, self).await
    }

    async fn update(&self, client: &ApiClient, id: &str) -> ApiResult<Moderator> {
        update(client, id, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{submit, Modal};
    use crate::http::testing::client;
    use futures::executor::block_on;
    use serde_json::Value;

    #[test]
    fn test_edit_without_password_omits_it() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"_id": "m1", "name": "Sam", "permissions": ["orders.view"]}));

        let existing = Moderator { id: "m1".into(), name: "Sam".into(), email: "sam@shop.io".into(), ..Default::default() };
        let mut modal = Modal::<ModeratorForm>::new();
        modal.open_edit("m1", ModeratorForm::from_moderator(&existing));
        modal.form_mut().toggle_permission("orders.view");
        block_on(submit(&api, &mut modal)).unwrap();

        let body: Value = serde_json::from_str(transport.last().body.as_deref().unwrap()).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["permissions"], json!(["orders.view"]));
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/moderators/m1");
    }

    #[test]
    fn test_set_active() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true}));
        block_on(set_active(&api, "m1", true)).unwrap();
        assert_eq!(transport.last().body.as_deref(), Some(r#"{"isActive":true}"#));
    }
}
