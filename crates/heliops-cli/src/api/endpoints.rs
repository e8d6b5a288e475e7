//! API endpoint URL builders
//!
//! Helper functions to construct API endpoint URLs.

use urlencoding::encode;

/// Query parameters for a filtered listing, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter; empty values are skipped
    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.params.push((key.to_string(), value));
        }
        self
    }

    /// Add a parameter when present
    pub fn param_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Build collection URL, e.g. `/clients`
pub fn collection_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url, path)
}

/// Build collection URL with query string, e.g. `/library?category=manuals`
pub fn list_url(base_url: &str, path: &str, query: &ListQuery) -> String {
    if query.is_empty() {
        collection_url(base_url, path)
    } else {
        format!("{}{}?{}", base_url, path, query.to_query_string())
    }
}

/// Build single-record URL, e.g. `/ground-support/42`
pub fn item_url(base_url: &str, path: &str, id: &str) -> String {
    format!("{}{}/{}", base_url, path, encode(id))
}

/// Build login URL
pub fn login_url(base_url: &str) -> String {
    format!("{}/auth/login", base_url)
}
