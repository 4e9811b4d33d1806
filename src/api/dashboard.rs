//! Dashboard Gateway

use super::decode;
use crate::error::ApiResult;
use crate::http::{ApiClient, QueryParams};
use crate::models::DashboardOverview;

pub async fn overview(client: &ApiClient) -> ApiResult<DashboardOverview> {
    decode(client.get("admin/dashboard", QueryParams::new()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::client;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_overview_decodes_partial_payload() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true, "data": {
            "totalUsers": 1520,
            "revenue": 48210.75,
            "recentOrders": [{"_id": "o1", "orderNumber": "A-100"}]
        }}));

        let overview = block_on(overview(&api)).unwrap();
        assert_eq!(overview.total_users, 1520);
        assert_eq!(overview.pending_products, 0);
        assert_eq!(overview.recent_orders[0].order_number, "A-100");
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/dashboard");
    }
}
