//! Print order statuses: the production state history of a print order.

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::types::{Endpoint, IndexResponse, wire};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Collection path
pub const COLLECTION: &str = "print_order_statuses";

/// Sender type used for statuses reported by a printer
pub const SENDER_TYPE_SUBCONTRACTOR: &str = "Subcontractor";

const RESOURCE: &str = "status";

/// Attribute names for [`Query::attr`]
pub mod attr {
    /// `id`
    pub const ID: &str = "id";
    /// `print_order_id`
    pub const PRINT_ORDER_ID: &str = "print_order_id";
    /// `sender_type`
    pub const SENDER_TYPE: &str = "sender_type";
    /// `status`
    pub const STATUS: &str = "status";
    /// `message`
    pub const MESSAGE: &str = "message";
    /// `created_at`
    pub const CREATED_AT: &str = "created_at";
    /// `updated_at`
    pub const UPDATED_AT: &str = "updated_at";
}

/// Production state of a print order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    /// Order exported to the printer
    Exported,
    /// Printer accepted the order
    Accepted,
    /// Being printed
    InProduction,
    /// Shipped in full
    Sent,
    /// Part of the order shipped
    PartiallySent,
    /// Delivered to the recipient
    Delivered,
    /// Production aborted
    Aborted,
    /// Returned by the carrier
    Returned,
    /// Sent again
    Resend,
}

impl State {
    /// All states, in production order
    pub const ALL: [State; 9] = [
        State::Exported,
        State::Accepted,
        State::InProduction,
        State::Sent,
        State::PartiallySent,
        State::Delivered,
        State::Aborted,
        State::Returned,
        State::Resend,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Exported => "Exported",
            State::Accepted => "Accepted",
            State::InProduction => "In production",
            State::Sent => "Sent",
            State::PartiallySent => "Partially sent",
            State::Delivered => "Delivered",
            State::Aborted => "Aborted",
            State::Returned => "Returned",
            State::Resend => "Resend",
        }
    }

    /// Parse the wire representation
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == s)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status entry of a print order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Id; 0 until stored
    #[serde(
        default,
        with = "wire::string_int",
        skip_serializing_if = "wire::is_zero"
    )]
    pub id: i64,

    /// Print order the status belongs to
    #[serde(default, with = "wire::string_int")]
    pub print_order_id: i64,

    /// Who reported the status
    #[serde(default)]
    pub sender_type: String,

    /// State name, see [`State`]
    #[serde(default)]
    pub status: String,

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

impl Status {
    /// New, unstored status reported by the printer
    pub fn new(state: State, print_order_id: i64, message: impl Into<String>) -> Self {
        Self {
            print_order_id,
            sender_type: SENDER_TYPE_SUBCONTRACTOR.to_string(),
            status: state.as_str().to_string(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// The status as a [`State`], if it is a known one
    pub fn state(&self) -> Option<State> {
        State::parse(&self.status)
    }

    /// Fetch a status
    pub async fn show(client: &ApiClient, id: i64, query: &Query) -> Result<Self> {
        client.get(Endpoint::member(COLLECTION, id), query).await
    }

    /// List statuses
    pub async fn index(client: &ApiClient, query: &Query) -> Result<IndexResponse<Self>> {
        client.get(Endpoint::collection(COLLECTION), query).await
    }

    /// Create this status; on success `self` holds the stored record
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

        let stored: Vec<Self> = client.post(Endpoint::collection(COLLECTION), &*self).await?;
        let first = stored.into_iter().next().ok_or_else(|| {
            Error::UnexpectedResponse("no status returned from create".to_string())
        })?;
        tracing::debug!(
            id = first.id,
            print_order_id = first.print_order_id,
            status = %first.status,
            "stored print order status"
        );
        *self = first;
        Ok(())
    }

    /// Most recently updated status in `statuses`
    pub fn latest(statuses: &[Status]) -> Option<&Status> {
        statuses.iter().max_by_key(|s| s.updated_at)
    }
}
