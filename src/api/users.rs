//! Users Gateway

use async_trait::async_trait;
use serde_json::json;

use super::{ack, decode, decode_page, item_path, Page};
use crate::error::ApiResult;
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::models::User;

const BASE: &str = "admin/users";

pub async fn list(client: &ApiClient, params: QueryParams) -> ApiResult<Page<User>> {
    decode_page(client.get(BASE, params).await?, "users")
}

pub async fn get(client: &ApiClient, id: &str) -> ApiResult<User> {
    decode(client.get(&item_path(BASE, id), QueryParams::new()).await?)
}

pub async fn set_blocked(client: &ApiClient, id: &str, blocked: bool) -> ApiResult<()> {
    let path = format!("{}/block", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "blocked": blocked })).await?)
}

pub async fn update_role(client: &ApiClient, id: &str, role: &str) -> ApiResult<()> {
    let path = format!("{}/role", item_path(BASE, id));
    ack(client.patch(&path, &json!({ "role": role })).await?)
}

pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<()> {
    ack(client.delete(&item_path(BASE, id), QueryParams::new()).await?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Users;

#[async_trait(?Send)]
impl ListResource for Users {
    type Item = User;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<User>> {
        list(client, query.to_params()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::client;
    use crate::http::Method;
    use crate::list::{refresh, ListController};
    use futures::executor::block_on;

    #[test]
    fn test_list_sends_filters_and_reads_stats() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({
            "success": true,
            "data": {
                "users": [{"_id": "u1", "name": "Ana", "role": "customer"}],
                "pagination": {"total": 1, "totalPages": 1},
                "stats": {"blocked": 0}
            }
        }));

        let mut controller = ListController::new(ListQuery::new(20).with_filter("role", "customer"));
        controller.set_search("ana");
        assert!(block_on(refresh(Users, &api, &mut controller)));

        assert_eq!(
            transport.last().url,
            "http://localhost:5000/api/admin/users?page=1&limit=20&search=ana&role=customer"
        );
        assert_eq!(controller.items()[0].name, "Ana");
        assert_eq!(controller.stat("blocked"), 0);
    }

    #[test]
    fn test_refresh_follows_shrunken_page() {
        let (api, transport) = client(Some("t"));
        let users = |from: usize, n: usize| {
            (from..from + n).map(|i| json!({"_id": format!("u{}", i), "name": "x"})).collect::<Vec<_>>()
        };
        transport
            .push_json(200, json!({"users": users(0, 20), "pagination": {"total": 57}}))
            .push_json(200, json!({"users": [], "pagination": {"total": 40}}))
            .push_json(200, json!({"users": users(20, 20), "pagination": {"total": 40}}));

        let mut controller = ListController::new(ListQuery::new(20));
        assert!(block_on(refresh(Users, &api, &mut controller)));
        assert!(controller.set_page(3));

        assert!(block_on(refresh(Users, &api, &mut controller)));
        assert_eq!(transport.count(), 3);
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/users?page=2&limit=20");
        assert_eq!(controller.page(), 2);
        assert_eq!(controller.items().len(), 20);
        assert_eq!(controller.items()[0].id, "u20");
    }

    #[test]
    fn test_block_and_role_paths() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true})).push_json(200, json!({"success": true}));

        block_on(set_blocked(&api, "u1", true)).unwrap();
        let sent = transport.last();
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, "http://localhost:5000/api/admin/users/u1/block");
        assert_eq!(sent.body.as_deref(), Some(r#"{"blocked":true}"#));

        block_on(update_role(&api, "u1", "vendor")).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/users/u1/role");
    }

    #[test]
    fn test_rejected_delete_surfaces_message() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": false, "message": "Cannot delete an admin"}));
        let err = block_on(delete(&api, "u9")).unwrap_err();
        assert_eq!(err.user_message(), "Cannot delete an admin");
        assert_eq!(transport.last().method, Method::Delete);
    }
}
