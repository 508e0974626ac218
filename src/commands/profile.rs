//! Profile command handler.

use anyhow::Result;
use schedcal_core::{ApiClient, CredentialStore, SessionProbe};

use super::finish;

pub async fn run_profile_command(api: ApiClient, store: CredentialStore) -> Result<()> {
    let probe = SessionProbe::new(api, store);
    let profile = finish(probe.fetch_profile().await.into())?;

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
