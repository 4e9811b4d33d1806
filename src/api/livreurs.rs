//! Livreurs (Delivery Staff) Gateway

use async_trait::async_trait;
use serde_json::json;

use super::{ack, decode_keyed, decode_page, item_path, Page};
use crate::error::ApiResult;
use crate::forms::{LivreurForm, Persist};
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::models::Livreur;

const BASE: &str = "admin/livreurs";

pub const AVAILABILITY: &[&str] = &["available", "busy", "offline"];

pub async fn list(client: &ApiClient, params: QueryParams) -> ApiResult<Page<Livreur>> {
    decode_page(client.get(BASE, params).await?, "livreurs")
}

pub async fn create(client: &ApiClient, form: &LivreurForm) -> ApiResult<Livreur> {
    decode_keyed(client.post(BASE, form).await?, "livreur")
}

pub async fn update(client: &ApiClient, id: &str, form: &LivreurForm) -> ApiResult<Livreur> {
    decode_keyed(client.put(&item_path(BASE, id), form).await?, "livreur")
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<()> {
    ack(client.delete(&item_path(BASE, id), QueryParams::new()).await?)
}

pub async fn update_availability(client: &ApiClient, id: &str, availability: &str) -> ApiResult<()> {
    let path = format!("{}/availability", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "availability": availability })).await?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Livreurs;

#[async_trait(?Send)]
impl ListResource for Livreurs {
    type Item = Livreur;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Livreur>> {
        list(client, query.to_params()).await
    }
}

#[async_trait(?Send)]
impl Persist for LivreurForm {
    type Saved = Livreur;

    async fn create(&self, client: &ApiClient) -> ApiResult<Livreur> {
        create(client, self).await
    }

    async fn update(&self, client: &ApiClient, id: &str) -> ApiResult<Livreur> {
        update(client, id, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::client;
    use crate::list::{refresh, ListController};
    use futures::executor::block_on;

    #[test]
    fn test_availability_filter_and_update() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true, "data": {
            "livreurs": [{"_id": "l1", "name": "Karim", "availability": "available"}],
            "pagination": {"total": 1}
        }}));

        let mut controller = ListController::new(ListQuery::new(20));
        controller.set_filter("availability", "available");
        block_on(refresh(Livreurs, &api, &mut controller));
        assert!(transport.last().url.ends_with("availability=available"));

        transport.push_json(200, json!({"success": true}));
        block_on(update_availability(&api, "l1", "busy")).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/livreurs/l1/availability");
        assert_eq!(transport.last().body.as_deref(), Some(r#"{"availability":"busy"}"#));
    }
}
