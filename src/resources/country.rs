//! Countries, referenced by print order delivery addresses.

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::Query;
use crate::types::{Endpoint, IndexResponse, wire};
use serde::{Deserialize, Serialize};

/// Collection path
pub const COLLECTION: &str = "countries";

/// Attribute names for [`Query::attr`]
pub mod attr {
    /// `id`
    pub const ID: &str = "id";
    /// `name`
    pub const NAME: &str = "name";
    /// `native_name`
    pub const NATIVE_NAME: &str = "native_name";
    /// `iso2`
    pub const ISO2: &str = "iso2";
    /// `iso3`
    pub const ISO3: &str = "iso3";
    /// `isonum`
    pub const ISONUM: &str = "isonum";
}

/// Country
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Country id
    #[serde(default, with = "wire::string_int")]
    pub id: i64,
    /// English name
    #[serde(default)]
    pub name: String,
    /// Name in the country's own language
    #[serde(default)]
    pub native_name: String,
    /// ISO 3166-1 alpha-2 code
    #[serde(default)]
    pub iso2: String,
    /// ISO 3166-1 alpha-3 code
    #[serde(default)]
    pub iso3: String,
    /// ISO 3166-1 numeric code
    #[serde(default)]
    pub isonum: String,
}

impl Country {
    /// Fetch a country
    pub async fn show(client: &ApiClient, id: i64, query: &Query) -> Result<Self> {
        client.get(Endpoint::member(COLLECTION, id), query).await
    }

    /// List countries
    pub async fn index(client: &ApiClient, query: &Query) -> Result<IndexResponse<Self>> {
        client.get(Endpoint::collection(COLLECTION), query).await
    }
}
