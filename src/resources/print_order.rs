//! Print orders: what a printer is asked to produce and where to ship it.

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::Query;
use crate::types::{Endpoint, IndexResponse, wire};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::country::Country;
use super::print_data::PrintData;
use super::print_order_status::Status;

/// Collection path
pub const COLLECTION: &str = "print_orders";

/// Include status history
pub const WITH_STATUSES: &str = "print_order_statuses";
/// Include print data
pub const WITH_PRINT_DATA: &str = "print_order_print_data";
/// Include print data with source files
pub const WITH_PRINT_DATA_FILE: &str = "print_order_print_data.file";
/// Include print data with manifestations
pub const WITH_PRINT_DATA_MANIFESTATION: &str = "print_order_print_data.manifestation";
/// Include print data with manifestations and ISBNs
pub const WITH_PRINT_DATA_MANIFESTATION_ISBN: &str =
    "print_order_print_data.manifestation.isbn";
/// Include print data with paper
pub const WITH_PRINT_DATA_PRINT_ITEM_PAPER: &str = "print_order_print_data.print_item_paper";
/// Include print data with paper and print item
pub const WITH_PRINT_DATA_PRINT_ITEM: &str =
    "print_order_print_data.print_item_paper.print_item";
/// Include print data with book binding
pub const WITH_PRINT_DATA_BOOK_BINDING: &str = "print_order_print_data.book_binding";
/// Include the delivery country
pub const WITH_DELIVERY_COUNTRY: &str = "delivery_country";

/// Attribute names for [`Query::attr`]
pub mod attr {
    /// `id`
    pub const ID: &str = "id";
    /// `intermediator_order_reference`
    pub const INTERMEDIATOR_REF: &str = "intermediator_order_reference";
    /// `client_order_reference`
    pub const CLIENT_REF: &str = "client_order_reference";
    /// `delivery_message`
    pub const DELIVERY_MSG: &str = "delivery_message";
    /// `order_weight`
    pub const ORDER_WEIGHT: &str = "order_weight";
    /// `is_bulky`
    pub const BULKY: &str = "is_bulky";
    /// `firstname`
    pub const RECIPIENT_FIRSTNAME: &str = "firstname";
    /// `lastname`
    pub const RECIPIENT_LASTNAME: &str = "lastname";
    /// `delivery_company_name`
    pub const RECIPIENT_COMPANY_NAME: &str = "delivery_company_name";
    /// `delivery_street`
    pub const DELIVERY_STREET: &str = "delivery_street";
    /// `delivery_zip`
    pub const DELIVERY_ZIP: &str = "delivery_zip";
    /// `delivery_city`
    pub const DELIVERY_CITY: &str = "delivery_city";
    /// `delivery_phone_number`
    pub const DELIVERY_PHONE: &str = "delivery_phone_number";
    /// `delivery_country_id`
    pub const DELIVERY_COUNTRY_ID: &str = "delivery_country_id";
    /// `delivery_address_pre_paid`
    pub const DELIVERY_PRE_PAID: &str = "delivery_address_pre_paid";
    /// `status`
    pub const STATUS: &str = "status";
    /// `active`
    pub const ACTIVE: &str = "active";
    /// `expected_shipment_date`
    pub const EXPECTED_SHIP_DATE: &str = "expected_shipment_date";
    /// `created_at`
    pub const CREATED_AT: &str = "created_at";
    /// `updated_at`
    pub const UPDATED_AT: &str = "updated_at";
}

/// Print order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintOrder {
    /// Id
    #[serde(default, with = "wire::string_int", skip_serializing_if = "wire::is_zero")]
    pub id: i64,
    /// Reference of the intermediating party
    #[serde(default, rename = "intermediator_order_reference")]
    pub intermediator_ref: String,
    /// Reference of the ordering client
    #[serde(default, rename = "client_order_reference")]
    pub client_ref: String,
    /// Message to the carrier
    #[serde(default, rename = "delivery_message")]
    pub delivery_msg: String,
    /// Total weight
    #[serde(default)]
    pub order_weight: String,
    /// Whether the shipment is bulky
    #[serde(default, rename = "is_bulky", with = "wire::flag")]
    pub bulky: bool,
    /// Recipient first name
    #[serde(default, rename = "firstname")]
    pub recipient_firstname: String,
    /// Recipient last name
    #[serde(default, rename = "lastname")]
    pub recipient_lastname: String,
    /// Recipient company
    #[serde(default, rename = "delivery_company_name")]
    pub recipient_company_name: String,
    /// Street address
    #[serde(default)]
    pub delivery_street: String,
    /// Postal code
    #[serde(default)]
    pub delivery_zip: String,
    /// City
    #[serde(default)]
    pub delivery_city: String,
    /// Recipient phone number
    #[serde(default, rename = "delivery_phone_number")]
    pub delivery_phone: String,
    /// Delivery country
    #[serde(default, with = "wire::string_int")]
    pub delivery_country_id: i64,
    /// Whether delivery is prepaid
    #[serde(default, rename = "delivery_address_pre_paid")]
    pub delivery_pre_paid: String,
    /// Current status name
    #[serde(default)]
    pub status: String,
    /// Whether the order is active
    #[serde(default, with = "wire::flag")]
    pub active: bool,
    /// Expected shipment date
    #[serde(
        default,
        rename = "expected_shipment_date",
        with = "wire::time",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_ship_date: Option<NaiveDateTime>,
    /// Creation time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    /// Status history, with [`WITH_STATUSES`]
    #[serde(
        default,
        rename = "print_order_statuses",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub statuses: Vec<Status>,
    /// Print data, with [`WITH_PRINT_DATA`] and its nested variants
    #[serde(
        default,
        rename = "print_order_print_data",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub print_data: Vec<PrintData>,
    /// Delivery country, with [`WITH_DELIVERY_COUNTRY`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_country: Option<Country>,
}

impl PrintOrder {
    /// Fetch a print order
    pub async fn show(client: &ApiClient, id: i64, query: &Query) -> Result<Self> {
        client.get(Endpoint::member(COLLECTION, id), query).await
    }

    /// List print orders
    pub async fn index(client: &ApiClient, query: &Query) -> Result<IndexResponse<Self>> {
        client.get(Endpoint::collection(COLLECTION), query).await
    }

    /// Most recently updated status, if statuses were loaded
    pub fn latest_status(&self) -> Option<&Status> {
        Status::latest(&self.statuses)
    }
}
