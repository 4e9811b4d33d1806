//! Newsletter Gateway

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ack, decode, decode_page, item_path, Page};
use crate::error::ApiResult;
use crate::forms::CampaignForm;
use crate::http::{ApiClient, QueryParams};
use crate::list::{ListQuery, ListResource};
use crate::markdown;
use crate::models::Subscriber;

const BASE: &str = "admin/newsletter";

#[derive(Serialize)]
struct Campaign<'a> {
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Delivery summary returned after a send
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignReport {
    pub sent: u64,
    pub failed: u64,
}

pub async fn list_subscribers(client: &ApiClient, params: QueryParams) -> ApiResult<Page<Subscriber>> {
    decode_page(client.get(&format!("{}/subscribers", BASE), params).await?, "subscribers")
}

pub async fn delete_subscriber(client: &ApiClient, id: &str) -> ApiResult<()> {
    let path = item_path(&format!("{}/subscribers", BASE), id);
    ack(client.delete(&path, QueryParams::new()).await?)
}

/// Render the Markdown body and send it to every active subscriber
pub async fn send_campaign(client: &ApiClient, form: &CampaignForm, asset_base: &str) -> ApiResult<CampaignReport> {
    let rendered = markdown::render(&form.body, asset_base);
    let campaign = Campaign { subject: form.subject.trim(), html: &rendered.html, text: &rendered.text };
    let report: CampaignReport = decode(client.post(&format!("{}/send", BASE), &campaign).await?)?;
    log::info!("[NEWSLETTER] Campaign '{}' sent to {} ({} failed)", campaign.subject, report.sent, report.failed);
    Ok(report)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Subscribers;

#[async_trait(?Send)]
impl ListResource for Subscribers {
    type Item = Subscriber;

    async fn fetch(&self, client: &ApiClient, query: &ListQuery) -> ApiResult<Page<Subscriber>> {
        list_subscribers(client, query.to_params()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::client;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    #[test]
    fn test_send_campaign_renders_markdown() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"success": true, "data": {"sent": 120, "failed": 2}}));

        let form = CampaignForm { subject: " Spring Sale ".into(), body: "**50%** off\n\n![b](/uploads/b.png)".into() };
        let report = block_on(send_campaign(&api, &form, "http://localhost:5000")).unwrap();
        assert_eq!(report, CampaignReport { sent: 120, failed: 2 });

        let sent = transport.last();
        assert_eq!(sent.url, "http://localhost:5000/api/admin/newsletter/send");
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["subject"], "Spring Sale");
        assert!(body["html"].as_str().unwrap().contains("<strong>50%</strong>"));
        assert!(body["html"].as_str().unwrap().contains("http://localhost:5000/uploads/b.png"));
        assert_eq!(body["text"], "50% off");
    }

    #[test]
    fn test_subscribers_and_delete() {
        let (api, transport) = client(Some("t"));
        transport.push_json(200, json!({"subscribers": [{"_id": "s1", "email": "a@b.c", "isActive": true}], "total": 1}));
        let page = block_on(list_subscribers(&api, QueryParams::new().with("page", 1))).unwrap();
        assert_eq!(page.items[0].email, "a@b.c");

        transport.push_json(200, json!({"success": true}));
        block_on(delete_subscriber(&api, "s1")).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/newsletter/subscribers/s1");
    }
}
