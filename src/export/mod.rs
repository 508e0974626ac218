//! Authenticated calendar export.
//!
//! This module sends a validated CRN selection to the export endpoint and
//! converts the binary response into an in-memory [`ExportArtifact`] the
//! caller can inspect or materialize to disk.
//!
//! # Example
//!
//! ```no_run
//! use schedcal_core::{ApiClient, CredentialStore, ExportClient, build_export_request};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new("http://localhost:8000/")?;
//! let store = CredentialStore::in_memory();
//! let client = ExportClient::new(api, store);
//!
//! let request = build_export_request("fall2022", "70851,71022", "")?;
//! let artifact = client.export_calendar(&request).await?;
//! artifact.write_to(std::path::Path::new("calendar.ics")).await?;
//! # Ok(())
//! # }
//! ```

mod artifact;
mod client;
mod error;

pub use artifact::{DEFAULT_CALENDAR_FILENAME, ExportArtifact};
pub use client::ExportClient;
pub use error::ExportError;
