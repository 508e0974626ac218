//! CLI command handlers.

mod export;
mod login;
mod profile;

pub use export::run_export_command;
pub use login::{run_login_command, run_logout_command};
pub use profile::run_profile_command;

use anyhow::{Result, anyhow};
use schedcal_core::OperationOutcome;

/// Folds a resolved pipeline outcome into the command result.
///
/// Failure messages surface to the user verbatim; `Pending` cannot occur in
/// the sequential CLI flow but still maps to an error rather than a panic.
pub(crate) fn finish<T>(outcome: OperationOutcome<T>) -> Result<T> {
    match outcome {
        OperationOutcome::Success(value) => Ok(value),
        OperationOutcome::Failure(message) => Err(anyhow!(message)),
        OperationOutcome::Pending => Err(anyhow!("operation did not resolve")),
    }
}
