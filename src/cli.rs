//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Login form bounds enforced before the pipeline is called.
pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 25;
pub const PASSWORD_MIN: usize = 4;
pub const PASSWORD_MAX: usize = 25;

/// Authenticate against a Schedulizer server and export course sections as
/// an ICS calendar.
#[derive(Parser, Debug)]
#[command(name = "schedcal")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Schedulizer endpoint base URL (overrides SCHEDCAL_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session credential
    Login {
        /// Account username
        #[arg(short, long, value_parser = username_in_bounds)]
        username: String,

        /// Account password (read from stdin when omitted)
        #[arg(short, long, value_parser = password_in_bounds)]
        password: Option<String>,
    },

    /// Clear the stored session credential
    Logout,

    /// Fetch the profile for the stored credential
    Profile,

    /// Export selected course sections as a calendar file
    Export {
        /// Semester config id (e.g. fall2022)
        #[arg(short, long)]
        config: String,

        /// Comma-separated CRN list (e.g. 70851,71022)
        #[arg(long, default_value = "")]
        crns: String,

        /// Comma-separated course-code list
        #[arg(long, default_value = "")]
        courses: String,

        /// Output path (defaults to the server-suggested name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fetch course data JSON instead of downloading the calendar
        #[arg(long)]
        preview: bool,
    },
}

fn username_in_bounds(value: &str) -> Result<String, String> {
    bounded("username", value, USERNAME_MIN, USERNAME_MAX)
}

fn password_in_bounds(value: &str) -> Result<String, String> {
    bounded("password", value, PASSWORD_MIN, PASSWORD_MAX)
}

fn bounded(field: &str, value: &str, min: usize, max: usize) -> Result<String, String> {
    let length = value.chars().count();
    if (min..=max).contains(&length) {
        Ok(value.to_string())
    } else {
        Err(format!("{field} must be {min}-{max} characters"))
    }
}
