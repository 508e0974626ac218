//! Validation of raw user input into well-formed export requests.
//!
//! Every call site that wants to talk to the export endpoint goes through
//! [`build_export_request`]; payloads are never re-derived inline. Validation
//! is all-or-nothing: one bad CRN entry rejects the whole submission.

mod error;

pub use error::ValidationError;

use serde::Serialize;
use tracing::debug;

/// A validated export request, constructed fresh per submission.
///
/// Invariant: every element of `crn_codes` parsed as an integer; a request
/// value existing at all means validation passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRequest {
    /// Semester config id; becomes a URL path segment.
    pub config: String,
    /// Course codes the CRNs belong to; opaque to the client.
    pub course_codes: Vec<String>,
    /// CRN codes of the specific sections to export.
    pub crn_codes: Vec<i64>,
}

/// Parses and validates raw user input into an [`ExportRequest`].
///
/// `raw_crn_list` is split on commas and each token is trimmed, then parsed
/// as an integer. If **any** token fails to parse, the whole submission is
/// rejected; a mixed valid/invalid list never produces a request.
/// `raw_course_list` is split the same way but its entries stay opaque
/// strings (course-code structure is the server's business).
///
/// An entirely empty CRN list is valid and yields zero entries; whether an
/// empty selection is acceptable is the server's decision.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyConfig`] when `config_name` trims to
/// nothing, and [`ValidationError::InvalidCrn`] naming the first offending
/// token when a CRN entry is not an integer.
pub fn build_export_request(
    config_name: &str,
    raw_crn_list: &str,
    raw_course_list: &str,
) -> Result<ExportRequest, ValidationError> {
    let config = config_name.trim();
    if config.is_empty() {
        return Err(ValidationError::EmptyConfig);
    }

    let crn_codes = parse_crn_list(raw_crn_list)?;
    let course_codes = split_course_list(raw_course_list);

    debug!(
        config,
        crns = crn_codes.len(),
        courses = course_codes.len(),
        "built export request"
    );

    Ok(ExportRequest {
        config: config.to_string(),
        course_codes,
        crn_codes,
    })
}

/// Parses a comma-separated CRN list, all-or-nothing.
fn parse_crn_list(raw: &str) -> Result<Vec<i64>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(str::trim)
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| ValidationError::invalid_crn(token))
        })
        .collect()
}

/// Splits a comma-separated course-code list into trimmed opaque entries.
fn split_course_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}
