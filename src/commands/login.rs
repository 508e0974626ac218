//! Login and logout command handlers.

use std::io::{self, IsTerminal, Read};

use anyhow::{Result, anyhow, bail};
use schedcal_core::{ApiClient, AuthClient, CredentialStore, OperationOutcome};
use tracing::info;

use crate::cli::{PASSWORD_MAX, PASSWORD_MIN};

use super::finish;

pub async fn run_login_command(
    api: ApiClient,
    store: CredentialStore,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password_input()?,
    };

    // --password goes through the arg parser; stdin input is checked here.
    let length = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&length) {
        bail!("password must be {PASSWORD_MIN}-{PASSWORD_MAX} characters");
    }

    let client = AuthClient::new(api, store);
    let outcome: OperationOutcome<()> = client.login(username, &password).await.into();
    finish(outcome)?;

    info!(username, "Logged in; session credential stored");
    Ok(())
}

pub fn run_logout_command(store: &CredentialStore) -> Result<()> {
    let removed = store
        .clear()
        .map_err(|error| anyhow!("Failed to clear stored credential: {error}"))?;

    if removed {
        info!("Cleared stored session credential");
    } else {
        info!("No stored session credential found");
    }

    Ok(())
}

fn read_password_input() -> Result<String> {
    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        let password = buffer.trim_end_matches(['\r', '\n']).to_string();
        if password.is_empty() {
            bail!("No password provided on stdin");
        }
        return Ok(password);
    }

    info!("Enter password, then press Enter:");
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
