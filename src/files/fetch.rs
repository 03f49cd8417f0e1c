//! Content download stage: stream each presigned URL into the output dir.

use std::path::{Component, Path, PathBuf};

use futures::StreamExt;
use reqwest::StatusCode;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

use super::File;
use super::pool::{Outcome, WorkerPool};

/// Download every file in `files` into `dir`, one outcome per file.
pub(super) async fn download_all(
    pool: &WorkerPool,
    http: reqwest::Client,
    files: Vec<File>,
    dir: PathBuf,
) -> Vec<Outcome<PathBuf>> {
    pool.run(files, move |file: File| {
        let http = http.clone();
        let dir = dir.clone();
        async move {
            let result = download_one(&http, &file, &dir).await;
            if let Err(e) = &result {
                tracing::warn!(
                    file_id = %file.id,
                    name = %file.original_name,
                    error = %e,
                    "file download failed"
                );
            }
            result
        }
    })
    .await
}

/// Download one file into `dir`, returning the written path.
///
/// Nothing is created unless the server answers 200. A body that fails midway
/// leaves no file behind.
pub(super) async fn download_one(
    http: &reqwest::Client,
    file: &File,
    dir: &Path,
) -> Result<PathBuf> {
    let target = target_path(file, dir)?;
    let url = file.require_presigned_url()?;

    let response = http.get(url).send().await?;
    if response.status() != StatusCode::OK {
        return Err(Error::UnexpectedStatus {
            status: response.status().as_u16(),
        });
    }

    let mut out = tokio::fs::File::create(&target).await?;
    match write_body(response, &mut out).await {
        Ok(bytes) => {
            tracing::debug!(
                file_id = %file.id,
                path = %target.display(),
                bytes,
                "file downloaded"
            );
            Ok(target)
        }
        Err(e) => {
            drop(out);
            if let Err(rm) = tokio::fs::remove_file(&target).await {
                tracing::warn!(
                    path = %target.display(),
                    error = %rm,
                    "failed to remove partial download"
                );
            }
            Err(e)
        }
    }
}

async fn write_body(response: reqwest::Response, out: &mut tokio::fs::File) -> Result<u64> {
    let mut written = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        out.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    out.flush().await?;
    Ok(written)
}

/// `dir/<original_name>`, provided the name is a single plain path component.
fn target_path(file: &File, dir: &Path) -> Result<PathBuf> {
    let name = file.original_name.as_str();
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(dir.join(part)),
        _ => Err(Error::InvalidFileName {
            id: file.id,
            name: name.to_string(),
        }),
    }
}
