//! Batch orchestration: resolve presigned URLs, then download, then report.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::BatchConfig;
use crate::error::{Error, Result};
use crate::types::FileId;

use super::File;
use super::fetch::download_all;
use super::pool::{Outcome, WorkerPool};
use super::presign::{CredentialSource, resolve_all};

/// Per-file results of a batch operation
///
/// Holds one entry per file in the batch. A top-level `Ok` with failed entries
/// means the batch ran but some files did not make it.
#[derive(Debug, Default)]
pub struct BatchReport {
    results: HashMap<FileId, Result<()>>,
}

impl BatchReport {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            results: HashMap::with_capacity(capacity),
        }
    }

    fn record(&mut self, id: FileId, result: Result<()>) {
        self.results.insert(id, result);
    }

    /// Number of files covered
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the report covers no files
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result for one file
    pub fn get(&self, id: FileId) -> Option<&Result<()>> {
        self.results.get(&id)
    }

    /// Error for one file, if it failed
    pub fn error(&self, id: FileId) -> Option<&Error> {
        self.results.get(&id).and_then(|r| r.as_ref().err())
    }

    /// Whether every file succeeded
    pub fn is_success(&self) -> bool {
        self.results.values().all(Result::is_ok)
    }

    /// Failed files with their errors
    pub fn failures(&self) -> impl Iterator<Item = (FileId, &Error)> {
        self.results
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (*id, e)))
    }

    /// Ids of files that succeeded
    pub fn succeeded(&self) -> impl Iterator<Item = FileId> + '_ {
        self.results
            .iter()
            .filter(|(_, r)| r.is_ok())
            .map(|(id, _)| *id)
    }

    /// All results
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &Result<()>)> {
        self.results.iter().map(|(id, r)| (*id, r))
    }

    /// Consume the report into its underlying map
    pub fn into_inner(self) -> HashMap<FileId, Result<()>> {
        self.results
    }
}

/// Concurrent presign-and-download over a list of files
///
/// The worker count is taken from [`BatchConfig`] when the batch is built and
/// applies to both stages of every call made through this instance.
#[derive(Clone)]
pub struct FileBatch {
    source: Arc<dyn CredentialSource>,
    http: reqwest::Client,
    config: BatchConfig,
}

impl std::fmt::Debug for FileBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBatch")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FileBatch {
    /// Batch runner using `client` and its configured batch settings
    pub fn new(client: &ApiClient) -> Self {
        Self::with_config(client, client.config().batch.clone())
    }

    /// Batch runner using `client` with explicit batch settings
    pub fn with_config(client: &ApiClient, config: BatchConfig) -> Self {
        Self {
            source: Arc::new(client.clone()),
            http: client.http().clone(),
            config,
        }
    }

    /// Batch runner with a custom presigned URL source
    ///
    /// `http` is used, unauthenticated, for the downloads themselves.
    pub fn with_source(
        source: Arc<dyn CredentialSource>,
        http: reqwest::Client,
        config: BatchConfig,
    ) -> Self {
        Self {
            source,
            http,
            config,
        }
    }

    /// Batch settings in use
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    fn pool(&self) -> WorkerPool {
        WorkerPool::new(self.config.workers)
    }

    /// Fetch presigned URLs for the files in `files` that lack one
    ///
    /// Files that already hold a presigned URL are not sent to the API and are
    /// reported as successful. Resolved files are updated in place.
    pub async fn resolve_presigned(&self, files: &mut [File]) -> BatchReport {
        let mut report = BatchReport::with_capacity(files.len());
        let resolved = self.resolve_missing(files).await;
        for file in files.iter() {
            report.record(file.id, Ok(()));
        }
        for (id, result) in resolved {
            report.record(id, result);
        }
        report
    }

    /// Resolve missing presigned URLs, then download every file into `destination`
    ///
    /// Each file is written to `destination/<original_name>`, overwriting any
    /// existing file of that name. Original names should be unique within the
    /// batch: a file whose body fails midway is removed from disk, and when two
    /// files share a name that removal can take out the other file's completed
    /// download.
    ///
    /// If resolving any presigned URL fails, no file is downloaded: failed files
    /// carry their resolution error and every other file
    /// [`Error::BatchAborted`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidDestination`] if `destination` does not exist or is
    /// not a directory; nothing is sent over the network in that case.
    pub async fn download(
        &self,
        files: &mut [File],
        destination: impl AsRef<Path>,
    ) -> Result<BatchReport> {
        let destination = destination.as_ref();
        check_destination(destination).await?;

        tracing::info!(
            files = files.len(),
            workers = self.config.workers,
            destination = %destination.display(),
            "downloading file batch"
        );

        let resolved = self.resolve_missing(files).await;
        let mut failed: Vec<FileId> = resolved
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(id, _)| *id)
            .collect();

        if !failed.is_empty() {
            failed.sort();
            tracing::warn!(
                failed = failed.len(),
                files = files.len(),
                "presigned url resolution failed, aborting batch download"
            );
            return Ok(aborted_report(files, resolved, &failed));
        }

        let outcomes = download_all(
            &self.pool(),
            self.http.clone(),
            files.to_vec(),
            destination.to_path_buf(),
        )
        .await;

        let mut report = BatchReport::with_capacity(files.len());
        for Outcome { id, result } in outcomes {
            report.record(id, result.map(|_| ()));
        }

        tracing::info!(
            files = report.len(),
            failed = report.failures().count(),
            "file batch finished"
        );
        Ok(report)
    }

    /// Run the presign stage over files lacking a URL and merge results back.
    ///
    /// Returns results for the submitted files only.
    async fn resolve_missing(&self, files: &mut [File]) -> HashMap<FileId, Result<()>> {
        let missing: Vec<File> = files
            .iter()
            .filter(|f| !f.has_presigned_url())
            .cloned()
            .collect();
        if missing.is_empty() {
            return HashMap::new();
        }

        tracing::debug!(files = missing.len(), "resolving presigned urls");
        let outcomes = resolve_all(&self.pool(), Arc::clone(&self.source), missing).await;

        let mut results = HashMap::with_capacity(outcomes.len());
        let mut fresh: HashMap<FileId, File> = HashMap::new();
        for Outcome { id, result } in outcomes {
            match result {
                Ok(file) => {
                    fresh.insert(id, file);
                    results.insert(id, Ok(()));
                }
                Err(e) => {
                    results.insert(id, Err(e));
                }
            }
        }

        for file in files.iter_mut() {
            if let Some(updated) = fresh.get(&file.id) {
                *file = updated.clone();
            }
        }

        results
    }
}

/// The destination must exist and be a directory.
pub(super) async fn check_destination(destination: &Path) -> Result<()> {
    match tokio::fs::metadata(destination).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(Error::InvalidDestination {
            path: destination.to_path_buf(),
        }),
    }
}

fn aborted_report(
    files: &[File],
    mut resolved: HashMap<FileId, Result<()>>,
    failed: &[FileId],
) -> BatchReport {
    let mut report = BatchReport::with_capacity(files.len());
    for file in files {
        let result = match resolved.remove(&file.id) {
            Some(Err(e)) => Err(e),
            _ => Err(Error::BatchAborted {
                failed: failed.to_vec(),
            }),
        };
        report.record(file.id, result);
    }
    report
}
