//! Moderation Queue Gateway
//!
//! Products submitted by vendors wait here until a moderator approves or
//! rejects them.

use async_trait::async_trait;
use serde_json::json;

use super::{ack, decode_page, item_path, Page};
use crate::error::{ApiError, ApiResult};
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::models::Product;

const BASE: &str = "moderator/products";

pub async fn pending_products(client: &ApiClient, params: QueryParams) -> ApiResult<Page<Product>> {
    decode_page(client.get(&format!("{}/pending", BASE), params).await?, "products")
}

pub async fn approve(client: &ApiClient, id: &str) -> ApiResult<()> {
    let path = format!("{}/approve", item_path(BASE, id));
    ack(client.patch(&path, &json!({})).await?)
}

/// A reason is mandatory; it is forwarded to the vendor
pub async fn reject(client: &ApiClient, id: &str, reason: &str) -> ApiResult<()> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ApiError::Validation("A rejection reason is required".to_string()));
    }
    let path = format!("{}/reject", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "reason": reason })).await?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PendingProducts;

#[async_trait(?Send)]
impl ListResource for PendingProducts {
    type Item = Product;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Product>> {
        pending_products(client, query.to_params()).await
    }
}
