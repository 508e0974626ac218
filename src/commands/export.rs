//! Export command handler.

use std::path::PathBuf;

use anyhow::Result;
use schedcal_core::{ApiClient, CredentialStore, ExportClient, build_export_request};
use tracing::info;

use super::finish;

pub async fn run_export_command(
    api: ApiClient,
    store: CredentialStore,
    config: &str,
    crns: &str,
    courses: &str,
    output: Option<PathBuf>,
    preview: bool,
) -> Result<()> {
    // Validation happens before any request; one bad CRN rejects the submission.
    let request = build_export_request(config, crns, courses)?;
    let client = ExportClient::new(api, store);

    if preview {
        let data = finish(client.fetch_course_data(&request).await.into())?;
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let artifact = finish(client.export_calendar(&request).await.into())?;
    let path = output.unwrap_or_else(|| PathBuf::from(artifact.file_name()));
    artifact.write_to(&path).await?;

    info!(
        path = %path.display(),
        bytes = artifact.len(),
        "Calendar saved"
    );
    Ok(())
}
