//! Query String Building
//!
//! Empty values are dropped when the query string is rendered, so screens can
//! set every filter unconditionally.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is (same set as JavaScript's encodeURIComponent)
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Ordered query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value
    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key.to_string(), value)),
        }
        self
    }

    /// `None` removes the key
    pub fn set_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        match value {
            Some(v) => self.set(key, v),
            None => self.remove(key),
        }
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.0.retain(|(k, _)| k != key);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Pairs that will actually be sent
    pub fn stripped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.stripped().next().is_none()
    }

    /// `a=1&b=x%20y`, without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.stripped()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, COMPONENT),
                    utf8_percent_encode(v, COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (k, v) in iter {
            params.set(&k.to_string(), v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_stripped() {
        let mut params = QueryParams::new();
        params
            .set("page", 1)
            .set("status", "")
            .set("search", "   ")
            .set_opt::<String>("role", None)
            .set("category", "phones");

        assert_eq!(params.to_query_string(), "page=1&category=phones");
        assert!(params.stripped().all(|(k, _)| k != "status" && k != "search" && k != "role"));
    }

    #[test]
    fn test_false_and_zero_are_kept() {
        let params = QueryParams::new().with("isActive", false).with("minStock", 0);
        assert_eq!(params.to_query_string(), "isActive=false&minStock=0");
    }

    #[test]
    fn test_values_are_encoded() {
        let params = QueryParams::new().with("search", "iphone 15 & case");
        assert_eq!(params.to_query_string(), "search=iphone%2015%20%26%20case");
    }

    #[test]
    fn test_set_replaces_and_set_opt_removes() {
        let mut params = QueryParams::new().with("page", 3);
        params.set("page", 1);
        assert_eq!(params.get("page"), Some("1"));
        params.set_opt::<u32>("page", None);
        assert!(params.is_empty());
    }
}
