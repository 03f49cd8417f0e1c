//! Delivery (tracking) numbers attached to print orders by the printer.

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::types::{Endpoint, IndexResponse, wire};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Collection path
pub const COLLECTION: &str = "print_order_delivery_numbers";

const RESOURCE: &str = "delivery number";

/// Attribute names for [`Query::attr`]
pub mod attr {
    /// `id`
    pub const ID: &str = "id";
    /// `print_order_id`
    pub const PRINT_ORDER_ID: &str = "print_order_id";
    /// `delivery_number`
    pub const DELIVERY_NUMBER: &str = "delivery_number";
    /// `message`
    pub const MESSAGE: &str = "message";
    /// `created_at`
    pub const CREATED_AT: &str = "created_at";
    /// `updated_at`
    pub const UPDATED_AT: &str = "updated_at";
}

/// Delivery number of a print order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryNumber {
    /// Id; 0 until stored
    #[serde(
        default,
        with = "wire::string_int",
        skip_serializing_if = "wire::is_zero"
    )]
    pub id: i64,

    /// Print order the number belongs to
    #[serde(default, with = "wire::string_int")]
    pub print_order_id: i64,

    /// Carrier tracking number
    #[serde(default)]
    pub delivery_number: String,

    /// Optional free text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Creation time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,

    /// Last update time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl DeliveryNumber {
    /// New, unstored delivery number
    pub fn new(
        print_order_id: i64,
        delivery_number: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            print_order_id,
            delivery_number: delivery_number.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Fetch a delivery number
    pub async fn show(client: &ApiClient, id: i64, query: &Query) -> Result<Self> {
        client.get(Endpoint::member(COLLECTION, id), query).await
    }

    /// List delivery numbers
    pub async fn index(client: &ApiClient, query: &Query) -> Result<IndexResponse<Self>> {
        client.get(Endpoint::collection(COLLECTION), query).await
    }

    /// Create this delivery number; on success `self` holds the stored record
    ///
    /// # Errors
    /// [`Error::AlreadyStored`] if the id is already set.
    pub async fn store(&mut self, client: &ApiClient) -> Result<()> {
        if self.id != 0 {
            return Err(Error::AlreadyStored {
                resource: RESOURCE,
                id: self.id,
            });
        }

        // The API answers a create with a list of the created records
        let stored: Vec<Self> = client.post(Endpoint::collection(COLLECTION), &*self).await?;
        let first = stored.into_iter().next().ok_or_else(|| {
            Error::UnexpectedResponse("no delivery number returned from create".to_string())
        })?;
        tracing::debug!(
            id = first.id,
            print_order_id = first.print_order_id,
            "stored delivery number"
        );
        *self = first;
        Ok(())
    }

    /// Save changes to this delivery number
    ///
    /// # Errors
    /// [`Error::MissingId`] if the id is not set.
    pub async fn update(&mut self, client: &ApiClient) -> Result<()> {
        let endpoint = self.member("update")?;
        let updated: Self = client.put(endpoint, &*self).await?;
        *self = updated;
        Ok(())
    }

    /// Delete this delivery number
    ///
    /// # Errors
    /// [`Error::MissingId`] if the id is not set.
    pub async fn delete(&mut self, client: &ApiClient) -> Result<()> {
        let endpoint = self.member("delete")?;
        let deleted: Self = client.delete(endpoint).await?;
        *self = deleted;
        Ok(())
    }

    fn member(&self, operation: &'static str) -> Result<Endpoint> {
        if self.id == 0 {
            return Err(Error::MissingId {
                resource: RESOURCE,
                operation,
            });
        }
        Ok(Endpoint::member(COLLECTION, self.id))
    }
}
