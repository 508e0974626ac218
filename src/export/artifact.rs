//! In-memory export artifact and response filename handling.

use std::fmt;
use std::path::Path;

use super::error::ExportError;

/// Fallback filename when the response names none.
pub const DEFAULT_CALENDAR_FILENAME: &str = "calendar.ics";

/// The binary result of a calendar export.
///
/// The bytes live in memory until the holder drops the artifact; the
/// pipeline never writes them anywhere on its own. [`write_to`] materializes
/// the artifact to a file when the holder decides the save should happen.
///
/// [`write_to`]: ExportArtifact::write_to
#[derive(Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Creates an artifact from response metadata and body bytes.
    ///
    /// The file name is sanitized to a single path component; an unusable
    /// name falls back to [`DEFAULT_CALENDAR_FILENAME`].
    #[must_use]
    pub fn new(file_name: &str, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        let sanitized = sanitize_filename(file_name);
        let file_name = if sanitized.is_empty() {
            DEFAULT_CALENDAR_FILENAME.to_string()
        } else {
            sanitized
        };
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Returns the suggested file name for saving.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the response content type, when the server sent one.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the artifact bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the artifact size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true when the artifact body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the artifact, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes the artifact bytes to the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the file cannot be written.
    pub async fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        tokio::fs::write(path, &self.bytes)
            .await
            .map_err(|error| ExportError::io(path, error))
    }
}

// Custom Debug impl that summarizes the body instead of dumping it.
impl fmt::Debug for ExportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportArtifact")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Parses a Content-Disposition header to extract the filename.
///
/// Handles both:
/// - `attachment; filename="calendar.ics"`
/// - `attachment; filename=calendar.ics`
pub(crate) fn parse_content_disposition(header: &str) -> Option<String> {
    let pos = header.find("filename=")?;
    let value = header[pos + 9..].trim();

    if let Some(stripped) = value.strip_prefix('"') {
        let end = stripped.find('"')?;
        return Some(stripped[..end].to_string());
    }

    let end = value.find(';').unwrap_or(value.len());
    let filename = value[..end].trim();
    (!filename.is_empty()).then(|| filename.to_string())
}

/// Sanitizes a response filename to a single safe path component.
///
/// Path separators and control characters become `_`; names that reduce to
/// nothing (or to `.`/`..`) come back empty so the caller can fall back.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if matches!(sanitized.as_str(), "." | "..") || sanitized.trim_matches('_').is_empty() {
        return String::new();
    }
    sanitized
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_keeps_bytes_and_name() {
        let artifact =
            ExportArtifact::new("calendar.ics", Some("text/ics".to_string()), b"BEGIN".to_vec());
        assert_eq!(artifact.file_name(), "calendar.ics");
        assert_eq!(artifact.content_type(), Some("text/ics"));
        assert_eq!(artifact.as_bytes(), b"BEGIN");
        assert_eq!(artifact.len(), 5);
        assert!(!artifact.is_empty());
    }

    #[test]
    fn test_artifact_falls_back_on_unusable_name() {
        let artifact = ExportArtifact::new("..", None, Vec::new());
        assert_eq!(artifact.file_name(), DEFAULT_CALENDAR_FILENAME);
        let artifact = ExportArtifact::new("///", None, Vec::new());
        assert_eq!(artifact.file_name(), DEFAULT_CALENDAR_FILENAME);
    }

    #[test]
    fn test_artifact_sanitizes_path_separators() {
        let artifact = ExportArtifact::new("../etc/passwd", None, Vec::new());
        assert!(!artifact.file_name().contains('/'), "{}", artifact.file_name());
    }

    #[test]
    fn test_artifact_debug_summarizes_body() {
        let artifact = ExportArtifact::new("calendar.ics", None, vec![0u8; 4096]);
        let debug = format!("{artifact:?}");
        assert!(debug.contains("4096"), "should show length: {debug}");
        assert!(debug.len() < 200, "should not dump the body: {debug}");
    }

    #[test]
    fn test_parse_content_disposition_quoted() {
        assert_eq!(
            parse_content_disposition(r#"attachment; filename="calendar.ics""#),
            Some("calendar.ics".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_unquoted() {
        assert_eq!(
            parse_content_disposition("attachment; filename=calendar.ics"),
            Some("calendar.ics".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_unquoted_with_trailing_param() {
        assert_eq!(
            parse_content_disposition("attachment; filename=calendar.ics; size=100"),
            Some("calendar.ics".to_string())
        );
    }

    #[test]
    fn test_parse_content_disposition_missing_filename() {
        assert_eq!(parse_content_disposition("attachment"), None);
        assert_eq!(parse_content_disposition("attachment; filename="), None);
    }

    #[tokio::test]
    async fn test_write_to_materializes_bytes() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("calendar.ics");
        let artifact = ExportArtifact::new("calendar.ics", None, b"BEGIN:VCALENDAR".to_vec());
        artifact.write_to(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"BEGIN:VCALENDAR");
    }

    #[tokio::test]
    async fn test_write_to_missing_directory_is_io_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("calendar.ics");
        let artifact = ExportArtifact::new("calendar.ics", None, Vec::new());
        let err = artifact.write_to(&path).await.unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
