//! Browser fetch Transport

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{HttpRequest, HttpResponse, Transport};
use crate::error::{ApiError, ApiResult};

/// `window.fetch`, CORS mode
#[derive(Default, Clone, Copy)]
pub struct FetchTransport;

fn js_err(e: JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_mode(RequestMode::Cors);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &init).map_err(js_err)?;
        for (name, value) in &request.headers {
            js_request.headers().set(name, value).map_err(js_err)?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(js_err)?;
        let response: Response = resp_value.dyn_into().map_err(js_err)?;

        let content_type = response.headers().get("content-type").ok().flatten();
        let text = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;

        Ok(HttpResponse {
            status: response.status(),
            status_text: response.status_text(),
            content_type,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
