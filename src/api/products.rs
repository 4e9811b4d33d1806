//! Products Gateway
//!
//! Admin catalog management plus the featured shelf. Single products are
//! read from the public endpoint, which returns the populated record.

use async_trait::async_trait;
use serde_json::json;

use super::{ack, decode_keyed, decode_page, item_path, Page};
use crate::error::ApiResult;
use crate::forms::{Persist, ProductForm};
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::models::Product;

const BASE: &str = "admin/products";

pub async fn list(client: &ApiClient, params: QueryParams) -> ApiResult<Page<Product>> {
    decode_page(client.get(BASE, params).await?, "products")
}

pub async fn get(client: &ApiClient, id: &str) -> ApiResult<Product> {
    decode_keyed(client.get(&item_path("products", id), QueryParams::new()).await?, "product")
}

pub async fn create(client: &ApiClient, form: &ProductForm) -> ApiResult<Product> {
    decode_keyed(client.post(BASE, form).await?, "product")
}

pub async fn update(client: &ApiClient, id: &str, form: &ProductForm) -> ApiResult<Product> {
    decode_keyed(client.put(&item_path(BASE, id), form).await?, "product")
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<()> {
    ack(client.delete(&item_path(BASE, id), QueryParams::new()).await?)
}

pub async fn set_featured(client: &ApiClient, id: &str, featured: bool) -> ApiResult<()> {
    let path = format!("{}/featured", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "featured": featured })).await?)
}

/// pending / approved / rejected
pub async fn update_status(client: &ApiClient, id: &str, status: &str) -> ApiResult<()> {
    let path = format!("{}/status", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "status": status })).await?)
}

pub async fn list_featured(client: &ApiClient) -> ApiResult<Vec<Product>> {
    let page = decode_page(client.get(&format!("{}/featured", BASE), QueryParams::new()).await?, "products")?;
    Ok(page.items)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Products;

#[async_trait(?Send)]
impl ListResource for Products {
    type Item = Product;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Product>> {
        list(client, query.to_params()).await
    }
}

#[async_trait(?Send)]
impl Persist for ProductForm {
    type Saved = Product;

    async fn create(&self, client: &ApiClient) -> ApiResult<Product> {
        create(client, self).await
    }

    async fn update(&self, client: &ApiClient, id: &str) -> ApiResult<Product> {
        update(client, id, self).await
    }
}
