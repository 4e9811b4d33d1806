//! Response Envelopes
//!
//! The backend answers either `{success, data, message}` or a bare payload.
//! Which one it was is decided here, once, so screens only ever see typed
//! results.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult, SERVER_ERROR};

/// Summary counters returned next to list items (counts by status, totals)
pub type Stats = Map<String, Value>;

/// Unwrap the envelope and decode its payload as `T`
pub fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    let payload = unwrap(body)?;
    serde_json::from_value(payload).map_err(ApiError::from)
}

/// Like [`decode`], but the payload may nest the record under `key`
/// (`{"data": {"product": {...}}}`)
pub fn decode_keyed<T: DeserializeOwned>(body: Value, key: &str) -> ApiResult<T> {
    let payload = match unwrap(body)? {
        Value::Object(mut map) if map.get(key).map_or(false, Value::is_object) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(payload).map_err(ApiError::from)
}

/// Unwrap the envelope, ignoring the payload (deletes, toggles)
pub fn ack(body: Value) -> ApiResult<()> {
    unwrap(body).map(|_| ())
}

/// Strip `{success, data, message}`; bare payloads pass through
pub fn unwrap(body: Value) -> ApiResult<Value> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };
    let Some(success) = map.get("success").and_then(Value::as_bool) else {
        return Ok(Value::Object(map));
    };

    if !success {
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(SERVER_ERROR)
            .to_string();
        return Err(ApiError::Rejected(message));
    }

    match map.remove("data") {
        Some(data) => Ok(data),
        None => {
            map.remove("success");
            map.remove("message");
            Ok(Value::Object(map))
        }
    }
}

/// One page of a paginated list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// Server-reported page count, if any
    pub total_pages: Option<u32>,
    pub page: Option<u32>,
    pub stats: Option<Stats>,
}

impl<T> Page<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self { items, total, total_pages: None, page: None, stats: None }
    }
}

fn as_u64(value: Option<&Value>) -> Option<u64> {
    value.and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f as u64)))
}

/// Decode a list payload. Items live under `key` (e.g. `"products"`), or
/// under `items`/`data`, or the payload is the array itself. Pagination is
/// read from a nested `pagination` object or flat keys.
pub fn decode_page<T: DeserializeOwned>(body: Value, key: &str) -> ApiResult<Page<T>> {
    let payload = unwrap(body)?;

    let mut map = match payload {
        Value::Array(items) => {
            let items: Vec<T> = serde_json::from_value(Value::Array(items))?;
            return Ok(Page::from_items(items));
        }
        Value::Object(map) => map,
        other => return Err(ApiError::Decode(format!("expected list, got {}", other))),
    };

    let items_key = [key, "items", "data", "results"]
        .into_iter()
        .find(|k| matches!(map.get(*k), Some(Value::Array(_))))
        .ok_or_else(|| ApiError::Decode(format!("missing `{}` list", key)))?;
    let items_value = map.remove(items_key).unwrap_or(Value::Null);
    let items: Vec<T> = serde_json::from_value(items_value)?;

    let pagination = match map.get("pagination") {
        Some(Value::Object(p)) => p.clone(),
        _ => map.clone(),
    };

    let total = as_u64(pagination.get("total"))
        .or_else(|| as_u64(pagination.get("totalItems")))
        .or_else(|| as_u64(pagination.get("count")))
        .unwrap_or(items.len() as u64);
    let total_pages = as_u64(pagination.get("totalPages"))
        .or_else(|| as_u64(pagination.get("pages")))
        .map(|p| p as u32);
    let page = as_u64(pagination.get("page"))
        .or_else(|| as_u64(pagination.get("currentPage")))
        .map(|p| p as u32);
    let stats = match map.remove("stats") {
        Some(Value::Object(stats)) => Some(stats),
        _ => None,
    };

    Ok(Page { items, total, total_pages, page, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use serde_json::json;

    #[test]
    fn test_wrapped_and_bare_payloads() {
        let wrapped: User = decode(json!({"success": true, "data": {"_id": "u1", "name": "Ana"}})).unwrap();
        let bare: User = decode(json!({"_id": "u1", "name": "Ana"})).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn test_keyed_record() {
        let nested: User = decode_keyed(json!({"success": true, "data": {"user": {"_id": "u1"}}}), "user").unwrap();
        let flat: User = decode_keyed(json!({"_id": "u1"}), "user").unwrap();
        assert_eq!(nested, flat);
    }

    #[test]
    fn test_success_false_is_rejected() {
        let err = decode::<User>(json!({"success": false, "message": "User not found"})).unwrap_err();
        assert_eq!(err, ApiError::Rejected("User not found".into()));
    }

    #[test]
    fn test_success_without_data_keeps_siblings() {
        let value = unwrap(json!({"success": true, "message": "ok", "token": "abc"})).unwrap();
        assert_eq!(value, json!({"token": "abc"}));
    }

    #[test]
    fn test_page_with_nested_pagination_and_stats() {
        let page: Page<User> = decode_page(
            json!({
                "success": true,
                "data": {
                    "users": [{"_id": "u1"}, {"_id": "u2"}],
                    "pagination": {"total": 57, "page": 2, "totalPages": 3},
                    "stats": {"blocked": 4, "active": 53}
                }
            }),
            "users",
        )
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 57);
        assert_eq!(page.total_pages, Some(3));
        assert_eq!(page.page, Some(2));
        assert_eq!(page.stats.unwrap()["blocked"], 4);
    }

    #[test]
    fn test_page_with_flat_keys_and_items() {
        let page: Page<User> = decode_page(json!({"items": [{"_id": "u1"}], "total": 1, "pages": 1}), "users").unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, Some(1));
    }

    #[test]
    fn test_page_from_bare_array() {
        let page: Page<User> = decode_page(json!([{"_id": "a"}, {"_id": "b"}]), "users").unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn test_page_missing_list_is_decode_error() {
        let err = decode_page::<User>(json!({"success": true, "data": {"total": 3}}), "users").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
