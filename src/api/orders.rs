//! Orders Gateway

use async_trait::async_trait;
use serde_json::json;

use super::{ack, decode_keyed, decode_page, item_path, Page};
use crate::error::ApiResult;
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::models::Order;

const BASE: &str = "admin/orders";

/// Order statuses in fulfilment order
pub const ORDER_STATUSES: &[&str] = &["pending", "confirmed", "shipped", "delivered", "cancelled"];

pub async fn list(client: &ApiClient, params: QueryParams) -> ApiResult<Page<Order>> {
    decode_page(client.get(BASE, params).await?, "orders")
}

pub async fn get(client: &ApiClient, id: &str) -> ApiResult<Order> {
    decode_keyed(client.get(&item_path(BASE, id), QueryParams::new()).await?, "order")
}

pub async fn update_status(client: &ApiClient, id: &str, status: &str) -> ApiResult<()> {
    let path = format!("{}/status", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "status": status })).await?)
}

pub async fn assign_livreur(client: &ApiClient, id: &str, livreur_id: &str) -> ApiResult<()> {
    let path = format!("{}/assign", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "livreurId": livreur_id })).await?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Orders;

#[async_trait(?Send)]
impl ListResource for Orders {
    type Item = Order;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Order>> {
        list(client, query.to_params()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::client;
    use crate::list::{refresh, ListController};
    use futures::executor::block_on;

    #[test]
    fn test_status_filter_and_optimistic_patch() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({
            "orders": [{"_id": "o1", "orderNumber": "A-100", "status": "pending", "totalAmount": 59.5}],
            "total": 1
        }));

        let mut controller = ListController::new(ListQuery::new(10).sorted());
        controller.set_filter("status", "pending");
        block_on(refresh(Orders, &api, &mut controller));
        assert!(transport.last().url.contains("status=pending"));
        assert_eq!(controller.total_pages(), 1);

        transport.push_json(200, json!({"success": true}));
        block_on(update_status(&api, "o1", "confirmed")).unwrap();
        controller.patch("o1", |o| o.status = "confirmed".into());
        assert_eq!(controller.items()[0].status, "confirmed");
    }

    #[test]
    fn test_assign_livreur_body() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true}));
        block_on(assign_livreur(&api, "o1", "l7")).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/orders/o1/assign");
        assert_eq!(transport.last().body.as_deref(), Some(r#"{"livreurId":"l7"}"#));
    }

    #[test]
    fn test_get_nested_order() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true, "data": {"order": {"_id": "o1", "items": [{"name": "Lamp", "quantity": 2}]}}}));
        let order = block_on(get(&api, "o1")).unwrap();
        assert_eq!(order.items[0].quantity, 2);
    }
}
