//! Export client: authenticated calendar download and course-data preview.

use reqwest::Response;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::auth::{ACCESS_TOKEN_SLOT, CredentialStore};
use crate::request::ExportRequest;

use super::artifact::{DEFAULT_CALENDAR_FILENAME, ExportArtifact, parse_content_disposition};
use super::error::ExportError;

/// Wire payload for the CRN endpoints.
#[derive(Serialize)]
struct CrnSelection<'a> {
    course_codes: &'a [String],
    crn_codes: &'a [i64],
}

/// Client for the export endpoints.
///
/// Reads the credential store to attach `Authorization: Bearer` when a token
/// is present; an anonymous export is still attempted when it is not, and
/// the server decides whether to allow it.
#[derive(Debug, Clone)]
pub struct ExportClient {
    api: ApiClient,
    store: CredentialStore,
}

impl ExportClient {
    /// Creates an export client over the injected API client and store.
    #[must_use]
    pub fn new(api: ApiClient, store: CredentialStore) -> Self {
        Self { api, store }
    }

    /// Exports the requested sections as a calendar file.
    ///
    /// The response body is held in memory as an [`ExportArtifact`]; nothing
    /// is written to disk or transmitted elsewhere. The artifact's file name
    /// comes from the `Content-Disposition` header when present.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Network`] on transport failure and
    /// [`ExportError::HttpStatus`] on a non-2xx response; no artifact is
    /// produced on any failure path.
    #[instrument(skip_all, fields(config = %request.config, crns = request.crn_codes.len()))]
    pub async fn export_calendar(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportArtifact, ExportError> {
        let response = self
            .post_selection(request, &["crn", &request.config, "download"])
            .await?;

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_disposition)
            .unwrap_or_else(|| DEFAULT_CALENDAR_FILENAME.to_string());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let url = response.url().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| ExportError::network(url, error))?;

        debug!(bytes = bytes.len(), file_name = %file_name, "export body received");
        Ok(ExportArtifact::new(&file_name, content_type, bytes.to_vec()))
    }

    /// Fetches the course data for the requested sections as JSON.
    ///
    /// Same payload and auth policy as [`export_calendar`], against the
    /// non-download CRN endpoint; used to preview a selection before
    /// committing to an export.
    ///
    /// [`export_calendar`]: ExportClient::export_calendar
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`export_calendar`](ExportClient::export_calendar),
    /// plus [`ExportError::MalformedResponse`] when the body is not JSON.
    #[instrument(skip_all, fields(config = %request.config, crns = request.crn_codes.len()))]
    pub async fn fetch_course_data(
        &self,
        request: &ExportRequest,
    ) -> Result<serde_json::Value, ExportError> {
        let response = self
            .post_selection(request, &["crn", &request.config])
            .await?;

        let url = response.url().to_string();
        response
            .json()
            .await
            .map_err(|error| ExportError::malformed(url, error.to_string()))
    }

    /// Posts the request's selection to a CRN endpoint and checks the status.
    async fn post_selection(
        &self,
        request: &ExportRequest,
        segments: &[&str],
    ) -> Result<Response, ExportError> {
        let url = self.api.url_for(segments);
        let payload = CrnSelection {
            course_codes: &request.course_codes,
            crn_codes: &request.crn_codes,
        };

        let mut builder = self.api.http().post(url.clone()).json(&payload);
        if let Some(token) = self.store.get(ACCESS_TOKEN_SLOT) {
            builder = builder.bearer_auth(token);
        } else {
            debug!("no stored access token; sending anonymous export request");
        }

        let response = builder
            .send()
            .await
            .map_err(|error| ExportError::network(url.as_str(), error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::http_status(url.as_str(), status.as_u16()));
        }
        Ok(response)
    }
}
