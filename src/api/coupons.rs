//! Coupons Gateway

use async_trait::async_trait;
use serde_json::json;

use super::{ack, decode_keyed, decode_page, item_path, Page};
use crate::error::ApiResult;
use crate::forms::{CouponForm, Persist};
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::models::Coupon;

const BASE: &str = "admin/coupons";

pub async fn list(client: &ApiClient, params: QueryParams) -> ApiResult<Page<Coupon>> {
    decode_page(client.get(BASE, params).await?, "coupons")
}

pub async fn create(client: &ApiClient, form: &CouponForm) -> ApiResult<Coupon> {
    decode_keyed(client.post(BASE, form).await?, "coupon")
}

pub async fn update(client: &ApiClient, id: &str, form: &CouponForm) -> ApiResult<Coupon> {
    decode_keyed(client.put(&item_path(BASE, id), form).await?, "coupon")
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<()> {
    ack(client.delete(&item_path(BASE, id), QueryParams::new()).await?)
}

pub async fn set_active(client: &ApiClient, id: &str, is_active: bool) -> ApiResult<()> {
    let path = format!("{}/status", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "isActive": is_active })).await?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Coupons;

#[async_trait(?Send)]
impl ListResource for Coupons {
    type Item = Coupon;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Coupon>> {
        list(client, query.to_params()).await
    }
}

#[async_trait(?Send)]
impl Persist for CouponForm {
    type Saved = Coupon;

    async fn create(&self, client: &ApiClient) -> ApiResult<Coupon> {
        create(client, self).await
    }

    async fn update(&self, client: &ApiClient, id: &str) -> ApiResult<Coupon> {
        update(client, id, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{submit, CouponField, Modal, SubmitOutcome};
    use crate::http::testing::client;
    use futures::executor::block_on;

    #[test]
    fn test_duplicate_code_keeps_modal_open() {
        let (api, transport) = client(Some("t"));
        transport.push_json(409, json!({"success": false, "message": "Coupon code already exists"}));

        let mut modal = Modal::<CouponForm>::new();
        modal.open_add();
        modal.form_mut().set(CouponField::Code, "spring").unwrap();
        modal.form_mut().set(CouponField::Value, "15").unwrap();

        let outcome = block_on(submit(&api, &mut modal)).unwrap();
        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(modal.error(), Some("Coupon code already exists"));
        assert!(transport.last().body.as_deref().unwrap().contains(r#""code":"SPRING""#));
    }

    #[test]
    fn test_toggle_and_delete_paths() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true})).push_json(200, json!({"success": true}));

        block_on(set_active(&api, "k1", false)).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/coupons/k1/status");

        block_on(delete(&api, "k1")).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/coupons/k1");
    }

    #[test]
    fn test_list_decodes_dates() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true, "data": {"coupons": [
            {"_id": "k1", "code": "SPRING", "promoType": "percentage", "value": 15, "expiresAt": "2026-05-31"}
        ]}}));
        let page = block_on(list(&api, QueryParams::new())).unwrap();
        assert_eq!(page.items[0].expires_at.map(|d| d.to_string()).as_deref(), Some("2026-05-31"));
    }
}
