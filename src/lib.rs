//! # publit-production
//!
//! Client library for the Publit Production API, used by printers to receive
//! print orders, report production statuses and delivery numbers, and download
//! the files to print.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI, purely a Rust crate for embedding
//! - **Sensible defaults** - Only the credentials need configuring
//! - **Per-file results** - Batch downloads report every file, never just the first failure
//!
//! ## Quick Start
//!
//! ```no_run
//! use publit_production::{ApiClient, Auth, Config, FileBatch, Query};
//! use publit_production::resources::{PrintOrder, print_order};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         auth: Auth::Basic {
//!             user: "printer".to_string(),
//!             password: "secret".to_string(),
//!         },
//!         ..Default::default()
//!     };
//!     let client = ApiClient::new(config)?;
//!
//!     let query = Query::new().with(&[print_order::WITH_PRINT_DATA_FILE]);
//!     let order = PrintOrder::show(&client, 42, &query).await?;
//!
//!     let mut files: Vec<_> = order
//!         .print_data
//!         .into_iter()
//!         .filter_map(|data| data.file)
//!         .collect();
//!
//!     let report = FileBatch::new(&client).download(&mut files, "/srv/print/42").await?;
//!     for (id, error) in report.failures() {
//!         eprintln!("file {} failed: {}", id, error);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP client for the Production API
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// File resources and batch downloads
pub mod files;
/// Query parameter builder
pub mod query;
/// Print order related resources
pub mod resources;
/// Shared types and wire format helpers
pub mod types;

pub use client::ApiClient;
pub use config::{Auth, BatchConfig, Config};
pub use error::{ApiErrorResponse, Error, Result};
pub use files::{BatchReport, CredentialSource, File, FileBatch};
pub use query::{Direction, Query};
pub use types::{Endpoint, FileId, IndexResponse};
