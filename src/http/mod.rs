//! HTTP Client
//!
//! Thin wrapper over a [`Transport`]: builds URLs, attaches the bearer token,
//! normalises JSON and non-JSON bodies, and raises the session's
//! unauthorized signal on 401. Every call is a single attempt.

mod fetch;
mod query;

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult, SERVER_ERROR};
use crate::session::Session;

pub use fetch::FetchTransport;
pub use query::QueryParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully built request handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as seen by the client
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(false, |ct| ct.to_ascii_lowercase().contains("json"))
    }
}

/// Sends one request; failures to reach the server are `ApiError::Network`
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// Per-call parameters
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: QueryParams,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn params(params: QueryParams) -> Self {
        Self { params, body: None }
    }

    pub fn body(body: Value) -> Self {
        Self { params: QueryParams::new(), body: Some(body) }
    }
}

/// REST client shared by every gateway
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: impl Transport + 'static, session: Session) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport: Rc::new(transport),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn url(&self, path: &str, params: &QueryParams) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let query = params.to_query_string();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    pub async fn request(&self, method: Method, path: &str, options: RequestOptions) -> ApiResult<Value> {
        let url = self.url(path, &options.params);

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        let body = match options.body {
            Some(value) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(value.to_string())
            }
            None => None,
        };

        log::debug!("[HTTP] {} {}", method, url);
        let response = self
            .transport
            .send(HttpRequest { method, url: url.clone(), headers, body })
            .await
            .map_err(|e| {
                log::error!("[HTTP] {} {} failed: {}", method, url, e);
                e
            })?;

        self.handle_response(method, &url, response)
    }

    fn handle_response(&self, method: Method, url: &str, response: HttpResponse) -> ApiResult<Value> {
        let body = parse_body(&response);
        if response.is_success() {
            return Ok(body);
        }

        if response.status == 401 {
            log::warn!("[HTTP] 401 from {} {}, session expired", method, url);
            self.session.unauthorized().emit();
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(SERVER_ERROR)
            .to_string();
        log::error!("[HTTP] {} {} -> {}: {}", method, url, response.status, message);

        Err(ApiError::Status { status: response.status, message })
    }

    pub async fn get(&self, path: &str, params: QueryParams) -> ApiResult<Value> {
        self.request(Method::Get, path, RequestOptions::params(params)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.request(Method::Post, path, RequestOptions::body(to_body(body)?)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.request(Method::Put, path, RequestOptions::body(to_body(body)?)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.request(Method::Patch, path, RequestOptions::body(to_body(body)?)).await
    }

    pub async fn delete(&self, path: &str, params: QueryParams) -> ApiResult<Value> {
        self.request(Method::Delete, path, RequestOptions::params(params)).await
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Validation(e.to_string()))
}

/// JSON bodies are parsed; anything else (proxy HTML pages, plain text)
/// becomes `{message, detail}` so callers never choke on it.
fn parse_body(response: &HttpResponse) -> Value {
    if response.is_json() {
        if response.body.trim().is_empty() {
            return Value::Null;
        }
        if let Ok(value) = serde_json::from_str(&response.body) {
            return value;
        }
    }
    let message = if response.status_text.is_empty() {
        SERVER_ERROR
    } else {
        response.status_text.as_str()
    };
    json!({ "message": message, "detail": response.body })
}


#[cfg(test)]
mod tests {
    use super::testing::client;
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_bearer_header_only_with_token() {
        let (api, transport) = client(Some("t0k"));
        transport.push_json(200, json!({"ok": true}));
        block_on(api.get("/users", QueryParams::new())).unwrap();
        assert_eq!(transport.last().header("Authorization"), Some("Bearer t0k"));

        let (api, transport) = client(None);
        transport.push_json(200, json!({}));
        block_on(api.get("users", QueryParams::new())).unwrap();
        assert_eq!(transport.last().header("Authorization"), None);
        assert_eq!(transport.last().url, "http://localhost:5000/api/users");
    }

    #[test]
    fn test_token_is_read_per_request() {
        let (api, transport) = client(None);
        transport.push_json(200, json!({})).push_json(200, json!({}));
        block_on(api.get("a", QueryParams::new())).unwrap();
        api.session().login("fresh");
        block_on(api.get("a", QueryParams::new())).unwrap();
        assert_eq!(transport.last().header("Authorization"), Some("Bearer fresh"));
    }

    #[test]
    fn test_query_string_strips_empty_filters() {
        let (api, transport) = client(None);
        transport.push_json(200, json!({}));
        let params = QueryParams::new().with("page", 2).with("status", "").with("role", "vendor");
        block_on(api.get("admin/users", params)).unwrap();
        assert_eq!(transport.last().url, "http://localhost:5000/api/admin/users?page=2&role=vendor");
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let (api, transport) = client(None);
        transport.push_json(201, json!({"success": true}));
        block_on(api.post("coupons", &json!({"code": "SPRING"}))).unwrap();
        let sent = transport.last();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.body.as_deref(), Some(r#"{"code":"SPRING"}"#));
    }

    #[test]
    fn test_server_message_is_surfaced() {
        let (api, transport) = client(None);
        transport.push_json(422, json!({"success": false, "message": "Stock must be positive"}));
        let err = block_on(api.get("products", QueryParams::new())).unwrap_err();
        assert_eq!(err, ApiError::Status { status: 422, message: "Stock must be positive".into() });
    }

    #[test]
    fn test_missing_message_falls_back() {
        let (api, transport) = client(None);
        transport.push_json(500, json!({"error": "boom"}));
        let err = block_on(api.get("products", QueryParams::new())).unwrap_err();
        assert_eq!(err.user_message(), SERVER_ERROR);
    }

    #[test]
    fn test_html_error_page_is_wrapped() {
        let (api, transport) = client(None);
        transport.push_text(502, "Bad Gateway", "<html><body>nginx</body></html>");
        let err = block_on(api.get("orders", QueryParams::new())).unwrap_err();
        assert_eq!(err, ApiError::Status { status: 502, message: "Bad Gateway".into() });
    }

    #[test]
    fn test_non_json_success_keeps_detail() {
        let (api, transport) = client(None);
        transport.push_text(200, "OK", "exported");
        let body = block_on(api.get("newsletter/export", QueryParams::new())).unwrap();
        assert_eq!(body["detail"], "exported");
    }

    #[test]
    fn test_network_failure_is_not_retried() {
        let (api, transport) = client(None);
        transport.push_network_error();
        let err = block_on(api.get("users", QueryParams::new())).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(transport.count(), 1);
    }

    #[test]
    fn test_unauthorized_emits_exactly_once() {
        let (api, transport) = client(Some("expired"));
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        api.session().unauthorized().subscribe(move || f.set(f.get() + 1));

        transport.push_json(401, json!({"message": "Token expired"}));
        let err = block_on(api.delete("coupons/1", QueryParams::new())).unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Token expired");
        assert_eq!(fired.get(), 1);

        transport.push_json(403, json!({"message": "Forbidden"}));
        let _ = block_on(api.get("users", QueryParams::new()));
        assert_eq!(fired.get(), 1);
    }
}
