//! Vendors Gateway

use async_trait::async_trait;
use serde_json::json;

use super::{ack, decode_page, item_path, Page};
use crate::error::{ApiError, ApiResult};
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::models::Vendor;

const BASE: &str = "admin/vendors";

pub const VENDOR_STATUSES: &[&str] = &["pending", "active", "suspended", "rejected"];

pub async fn list(client: &ApiClient, params: QueryParams) -> ApiResult<Page<Vendor>> {
    decode_page(client.get(BASE, params).await?, "vendors")
}

pub async fn update_status(client: &ApiClient, id: &str, status: &str) -> ApiResult<()> {
    let path = format!("{}/status", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "status": status })).await?)
}

/// `rate` is a percentage in 0..=100
pub async fn update_commission(client: &ApiClient, id: &str, rate: f64) -> ApiResult<()> {
    if !(0.0..=100.0).contains(&rate) {
        return Err(ApiError::Validation("Commission must be between 0 and 100".to_string()));
    }
    let path = format!("{}/commission", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "commissionRate": rate })).await?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Vendors;

#[async_trait(?Send)]
impl ListResource for Vendors {
    type Item = Vendor;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Vendor>> {
        list(client, query.to_params()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::client;
    use futures::executor::block_on;

    #[test]
    fn test_commission_range_checked_locally() {
        let (api, transport) = client(Some("t"));
        let err = block_on(update_commission(&api, "v1", 140.0)).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(transport.count(), 0);

        transport.push_json(200, json!({"success": true}));
        block_on(update_commission(&api, "v1", 12.5)).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/vendors/v1/commission");
        assert_eq!(transport.last().body.as_deref(), Some(r#"{"commissionRate":12.5}"#));
    }

    #[test]
    fn test_status_update() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true}));
        block_on(update_status(&api, "v1", "suspended")).unwrap();
        assert_eq!(transport.last().body.as_deref(), Some(r#"{"status":"suspended"}"#));
    }
}
