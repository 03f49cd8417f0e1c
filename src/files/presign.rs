//! Presigned URL resolution stage.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::types::FileId;

use super::pool::{Outcome, WorkerPool};
use super::{AUX_PRESIGNED, File};

/// Source of presigned download URLs
///
/// [`ApiClient`] is the production implementation; the seam exists so batch
/// behaviour can be exercised without a live API.
#[async_trait::async_trait]
pub trait CredentialSource: Send + Sync {
    /// Fetch the file with a fresh presigned URL
    async fn presigned(&self, id: FileId) -> Result<File>;
}

#[async_trait::async_trait]
impl CredentialSource for ApiClient {
    async fn presigned(&self, id: FileId) -> Result<File> {
        fetch_presigned(self, id).await
    }
}

/// `GET files/{id}?aux=presigned_url`
pub(super) async fn fetch_presigned(client: &ApiClient, id: FileId) -> Result<File> {
    File::show(client, id, &Query::new().aux(AUX_PRESIGNED)).await
}

/// Resolve presigned URLs for `files`, one outcome per file.
///
/// Workers receive owned copies and hand back refreshed ones; merging them into
/// the caller's list is left to the orchestrator.
pub(super) async fn resolve_all(
    pool: &WorkerPool,
    source: Arc<dyn CredentialSource>,
    files: Vec<File>,
) -> Vec<Outcome<File>> {
    pool.run(files, move |file: File| {
        let source = Arc::clone(&source);
        async move { resolve_one(source.as_ref(), file).await }
    })
    .await
}

async fn resolve_one(source: &dyn CredentialSource, mut file: File) -> Result<File> {
    let id = file.id;
    let fresh = match source.presigned(id).await {
        Ok(fresh) => fresh,
        Err(e) => {
            tracing::warn!(file_id = %id, error = %e, "failed to resolve presigned url");
            return Err(e);
        }
    };

    file.absorb(fresh);
    if !file.has_presigned_url() {
        tracing::warn!(file_id = %id, "API returned no presigned url");
        return Err(Error::MissingPresignedUrl { id });
    }

    tracing::debug!(file_id = %id, "resolved presigned url");
    Ok(file)
}
