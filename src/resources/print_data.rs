//! Print data: what to print for each item of a print order.
//!
//! A print data record references the source [`File`], the manifestation being
//! printed, the paper and the binding. The related records are only included
//! when requested through the `WITH_*` relations.

use std::collections::HashMap;

use crate::client::ApiClient;
use crate::error::Result;
use crate::files::File;
use crate::query::Query;
use crate::types::{Endpoint, IndexResponse, wire};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Collection path
pub const COLLECTION: &str = "print_order_print_data";

/// Include the manifestation
pub const WITH_MANIFESTATION: &str = "manifestation";
/// Include the manifestation and its ISBN
pub const WITH_MANIFESTATION_ISBN: &str = "manifestation.isbn";
/// Include the source file
pub const WITH_FILE: &str = "file";
/// Include the paper
pub const WITH_PRINT_ITEM_PAPER: &str = "print_item_paper";
/// Include the paper and its print item
pub const WITH_PRINT_ITEM: &str = "print_item_paper.print_item";
/// Include the book binding
pub const WITH_BOOK_BINDING: &str = "book_binding";

/// Attribute names for [`Query::attr`]
pub mod attr {
    /// `id`
    pub const ID: &str = "id";
    /// `print_order_id`
    pub const PRINT_ORDER_ID: &str = "print_order_id";
    /// `manifestation_id`
    pub const MANIFESTATION_ID: &str = "manifestation_id";
    /// `file_id`
    pub const FILE_ID: &str = "file_id";
    /// `print_item_paper_id`
    pub const PRINT_ITEM_PAPER_ID: &str = "print_item_paper_id";
    /// `book_binding_id`
    pub const BOOK_BINDING_ID: &str = "book_binding_id";
    /// `amount`
    pub const AMOUNT: &str = "amount";
    /// `pages`
    pub const PAGES: &str = "pages";
    /// `width`
    pub const WIDTH: &str = "width";
    /// `height`
    pub const HEIGHT: &str = "height";
    /// `color_pages_amount`
    pub const COLOR_PAGES_AMOUNT: &str = "color_pages_amount";
    /// `color_pages`
    pub const COLOR_PAGES: &str = "color_pages";
    /// `reference_number`
    pub const REFERENCE_NUMBER: &str = "reference_number";
    /// `color_print`
    pub const COLOR_PRINT: &str = "color_print";
    /// `length_unit`
    pub const LENGTH_UNIT: &str = "length_unit";
    /// `format`
    pub const FORMAT: &str = "format";
    /// `publisher`
    pub const PUBLISHER: &str = "publisher";
    /// `title`
    pub const TITLE: &str = "title";
    /// `subtitle`
    pub const SUBTITLE: &str = "subtitle";
    /// `edgewidth`
    pub const EDGE_WIDTH: &str = "edgewidth";
    /// `created_at`
    pub const CREATED_AT: &str = "created_at";
    /// `updated_at`
    pub const UPDATED_AT: &str = "updated_at";
}

/// Print data of one print order item
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintData {
    /// Id
    #[serde(default, with = "wire::string_int", skip_serializing_if = "wire::is_zero")]
    pub id: i64,
    /// Owning print order
    #[serde(default, with = "wire::string_int")]
    pub print_order_id: i64,
    /// Manifestation being printed
    #[serde(default, with = "wire::string_int")]
    pub manifestation_id: i64,
    /// Source file
    #[serde(default, with = "wire::string_int")]
    pub file_id: i64,
    /// Paper
    #[serde(default, with = "wire::string_int")]
    pub print_item_paper_id: i64,
    /// Binding
    #[serde(default, with = "wire::string_int")]
    pub book_binding_id: i64,
    /// Number of copies
    #[serde(default, with = "wire::string_int")]
    pub amount: i64,
    /// Page count
    #[serde(default, with = "wire::string_int")]
    pub pages: i64,
    /// Page width in [`Self::length_unit`]
    #[serde(default, with = "wire::string_float")]
    pub width: f64,
    /// Page height in [`Self::length_unit`]
    #[serde(default, with = "wire::string_float")]
    pub height: f64,
    /// Number of color pages
    #[serde(default, with = "wire::string_int")]
    pub color_pages_amount: i64,
    /// Which pages are in color
    #[serde(default)]
    pub color_pages: String,
    /// Reference number for the printer
    #[serde(default)]
    pub reference_number: String,
    /// Whether the item is printed in color
    #[serde(default, with = "wire::flag")]
    pub color_print: bool,
    /// Unit of the dimensions (e.g. "mm")
    #[serde(default)]
    pub length_unit: String,
    /// Format name
    #[serde(default)]
    pub format: String,
    /// Publisher name
    #[serde(default)]
    pub publisher: String,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Subtitle
    #[serde(default)]
    pub subtitle: String,
    /// Spine width
    #[serde(default, rename = "edgewidth", with = "wire::string_float")]
    pub edge_width: f64,
    /// Source file, with [`WITH_FILE`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
    /// Manifestation, with [`WITH_MANIFESTATION`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifestation: Option<Manifestation>,
    /// Paper, with [`WITH_PRINT_ITEM_PAPER`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_item_paper: Option<PrintItemPaper>,
    /// Binding, with [`WITH_BOOK_BINDING`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_binding: Option<BookBinding>,
    /// Creation time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl PrintData {
    /// Fetch print data
    pub async fn show(client: &ApiClient, id: i64, query: &Query) -> Result<Self> {
        client.get(Endpoint::member(COLLECTION, id), query).await
    }

    /// List print data
    pub async fn index(client: &ApiClient, query: &Query) -> Result<IndexResponse<Self>> {
        client.get(Endpoint::collection(COLLECTION), query).await
    }

    /// Group `data` by manifestation id, keeping the input order within a group
    pub fn per_manifestation(data: &[PrintData]) -> HashMap<i64, Vec<&PrintData>> {
        let mut grouped: HashMap<i64, Vec<&PrintData>> = HashMap::new();
        for item in data {
            grouped.entry(item.manifestation_id).or_default().push(item);
        }
        grouped
    }
}

/// Book binding
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookBinding {
    /// Id
    #[serde(default, with = "wire::string_int", skip_serializing_if = "wire::is_zero")]
    pub id: i64,
    /// Binding type
    #[serde(default, rename = "type")]
    pub binding_type: String,
    /// Creation time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Published edition of a work
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifestation {
    /// Id
    #[serde(default, with = "wire::string_int", skip_serializing_if = "wire::is_zero")]
    pub id: i64,
    /// Work the manifestation belongs to
    #[serde(default, with = "wire::string_int")]
    pub work_id: i64,
    /// Product id
    #[serde(default, with = "wire::string_int")]
    pub product_id: i64,
    /// ISBN id
    #[serde(default, with = "wire::string_int")]
    pub isbn_id: i64,
    /// Manifestation type
    #[serde(default, rename = "type")]
    pub manifestation_type: String,
    /// Status
    #[serde(default)]
    pub status: String,
    /// Format name
    #[serde(default)]
    pub format: String,
    /// Publication time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<NaiveDateTime>,
    /// Creation time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    /// Deletion time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<NaiveDateTime>,
    /// ISBN, with [`WITH_MANIFESTATION_ISBN`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<Isbn>,
}

/// ISBN of a manifestation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Isbn {
    /// Id
    #[serde(default, with = "wire::string_int", skip_serializing_if = "wire::is_zero")]
    pub id: i64,
    /// ISBN with hyphens
    #[serde(default)]
    pub formatted_isbn: String,
    /// Owning account
    #[serde(default, with = "wire::string_int")]
    pub account_id: i64,
    /// Contractor
    #[serde(default, with = "wire::string_int")]
    pub contractor_id: i64,
    /// Creation time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Paper used for a print item
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintItemPaper {
    /// Id
    #[serde(default, with = "wire::string_int", skip_serializing_if = "wire::is_zero")]
    pub id: i64,
    /// Print item the paper is used for
    #[serde(default, with = "wire::string_int")]
    pub print_item_id: i64,
    /// Paper name
    #[serde(default)]
    pub name: String,
    /// The printer's name for the paper
    #[serde(default)]
    pub proprietary_paper_name: String,
    /// Paper code
    #[serde(default)]
    pub paper_code: String,
    /// Bulk
    #[serde(default)]
    pub bulk: String,
    /// Weight
    #[serde(default)]
    pub weight: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Print item, with [`WITH_PRINT_ITEM`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_item: Option<PrintItem>,
    /// Creation time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Printed part of a book (cover, interior, ...)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintItem {
    /// Id
    #[serde(default, with = "wire::string_int", skip_serializing_if = "wire::is_zero")]
    pub id: i64,
    /// Item type
    #[serde(default, rename = "type")]
    pub item_type: String,
}
