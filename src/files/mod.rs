//! File resources and concurrent batch downloads.
//!
//! A [`File`] describes a document stored by Publit (print PDFs, covers, ...).
//! Downloading one takes two steps: ask the API for a time-limited presigned
//! URL, then GET that URL without further authentication. [`FileBatch`] runs
//! both steps over a whole list through a bounded worker pool and reports one
//! result per file.

mod batch;
mod fetch;
mod pool;
mod presign;

pub use batch::{BatchReport, FileBatch};
pub use presign::CredentialSource;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::types::{Endpoint, FileId, IndexResponse, wire};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Collection path of the files resource
pub const COLLECTION: &str = "files";

/// Auxiliary value asking the API to include a presigned URL
pub const AUX_PRESIGNED: &str = "presigned_url";

/// File attribute names, for use in [`Query::attr`] filters
pub mod attr {
    /// `id`
    pub const ID: &str = "id";
    /// `type`
    pub const TYPE: &str = "type";
    /// `original_name`
    pub const ORIGINAL_NAME: &str = "original_name";
    /// `size`
    pub const SIZE: &str = "size";
    /// `extension`
    pub const EXTENSION: &str = "extension";
    /// `mime_type`
    pub const MIME: &str = "mime_type";
    /// `checksum`
    pub const CHECKSUM: &str = "checksum";
    /// `url`
    pub const URL: &str = "url";
    /// `auto_generated`
    pub const AUTO_GENERATED: &str = "auto_generated";
    /// `created_at`
    pub const CREATED_AT: &str = "created_at";
    /// `updated_at`
    pub const UPDATED_AT: &str = "updated_at";
    /// `deleted_at`
    pub const DELETED_AT: &str = "deleted_at";
}

/// File as returned by the `files` resource
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// File id
    #[serde(default)]
    pub id: FileId,

    /// File type (e.g. "Cover", "Interior")
    #[serde(default, rename = "type")]
    pub file_type: String,

    /// Name the file was uploaded with; used as the download file name
    #[serde(default)]
    pub original_name: String,

    /// Size in bytes
    #[serde(default, with = "wire::string_int")]
    pub size: i64,

    /// File extension
    #[serde(default)]
    pub extension: String,

    /// MIME type
    #[serde(default, rename = "mime_type")]
    pub mime: String,

    /// Checksum reported by the API
    #[serde(default)]
    pub checksum: String,

    /// Internal storage URL (not directly downloadable)
    #[serde(default)]
    pub url: String,

    /// Whether Publit generated the file itself
    #[serde(default, with = "wire::flag")]
    pub auto_generated: bool,

    /// Creation time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,

    /// Last update time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,

    /// Deletion time
    #[serde(default, with = "wire::time", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<NaiveDateTime>,

    /// Time-limited download URL, only present when requested with [`AUX_PRESIGNED`]
    #[serde(
        default,
        deserialize_with = "wire::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub presigned_url: Option<String>,
}

impl File {
    /// File with only an id set, e.g. for resolving a presigned URL
    pub fn with_id(id: impl Into<FileId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Whether the file holds a presigned URL
    pub fn has_presigned_url(&self) -> bool {
        self.presigned_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Fetch a file
    pub async fn show(client: &ApiClient, id: FileId, query: &Query) -> Result<Self> {
        client.get(Endpoint::member(COLLECTION, id.get()), query).await
    }

    /// List files
    pub async fn index(client: &ApiClient, query: &Query) -> Result<IndexResponse<Self>> {
        client.get(Endpoint::collection(COLLECTION), query).await
    }

    /// Refresh this file from the API, including a presigned URL
    ///
    /// The presigned URL is valid for a limited time only.
    pub async fn fetch_presigned_url(&mut self, client: &ApiClient) -> Result<()> {
        let fresh = presign::fetch_presigned(client, self.id).await?;
        self.absorb(fresh);
        Ok(())
    }

    /// Download this file into `dir`, named after its original name
    ///
    /// The file must already hold a presigned URL; use [`FileBatch::download`]
    /// to resolve and download in one go.
    pub async fn download_to(
        &self,
        client: &ApiClient,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        batch::check_destination(dir).await?;
        fetch::download_one(client.http(), self, dir).await
    }

    /// Replace this file with a refreshed copy from the API
    ///
    /// Fields the response left empty keep their current value.
    pub(crate) fn absorb(&mut self, fresh: File) {
        let id = self.id;
        let original_name = std::mem::take(&mut self.original_name);
        *self = fresh;
        if self.id.is_unset() {
            self.id = id;
        }
        if self.original_name.is_empty() {
            self.original_name = original_name;
        }
    }

    pub(crate) fn require_presigned_url(&self) -> Result<&str> {
        self.presigned_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(Error::MissingPresignedUrl { id: self.id })
    }
}
