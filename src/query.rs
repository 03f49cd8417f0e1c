//! Query parameters for GET calls
//!
//! [`Query`] collects the parameters understood by the Production API
//! (relations to load, auxiliary data, paging, attribute filters) and applies
//! them to a request URL.

use url::Url;

/// Query key requesting auxiliary data
pub const KEY_AUX: &str = "aux";
/// Query key listing relations to load
pub const KEY_WITH: &str = "with";
/// Query key for the page size
pub const KEY_LIMIT: &str = "limit";
/// Query key for the page offset
pub const KEY_OFFSET: &str = "offset";
/// Query key for ordering
pub const KEY_ORDER_BY: &str = "order_by";

/// Sort direction for [`Query::order_by`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Ordered set of query parameters
///
/// Setting a key twice keeps the last value, matching how the API reads them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Request auxiliary data (e.g. `presigned_url`)
    pub fn aux(self, value: impl Into<String>) -> Self {
        self.param(KEY_AUX, value)
    }

    /// Load relations, e.g. `with(&["print_order_statuses", "delivery_country"])`
    pub fn with(self, relations: &[&str]) -> Self {
        self.param(KEY_WITH, relations.join(","))
    }

    /// Page through results
    pub fn limit(self, limit: u32, offset: u32) -> Self {
        self.param(KEY_LIMIT, limit.to_string())
            .param(KEY_OFFSET, offset.to_string())
    }

    /// Filter on an attribute value
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.param(name, value)
    }

    /// Order results by an attribute
    pub fn order_by(self, attr: &str, direction: Direction) -> Self {
        self.param(KEY_ORDER_BY, format!("{}|{}", attr, direction.as_str()))
    }

    /// Value of a parameter, if set
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Append the parameters to `url`
    pub fn apply(&self, url: &mut Url) {
        if self.params.is_empty() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &self.params {
            pairs.append_pair(key, value);
        }
    }
}
