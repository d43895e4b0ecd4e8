use super::error::ClientError;
use anyhow::{Context, Result};
use regex::Regex;
use reqwest::{
    Response,
    header::{CONTENT_DISPOSITION, CONTENT_TYPE},
};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use tracing::debug;

pub const SPREADSHEET_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const DEFAULT_TEMPLATE_FILENAME: &str = "template_nilai_kelulusan.xlsx";

static DISPOSITION_FILENAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"filename="?([^";\n]+)"?"#).ok());

/// Binary response body with the name it should be saved under.
#[derive(Clone, Debug)]
pub struct Download {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Download {
    pub(crate) async fn from_response(
        response: Response,
        default_filename: &str,
    ) -> Result<Self, ClientError> {
        let headers = response.headers();
        let filename = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| default_filename.to_string());
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let bytes = response.bytes().await.map_err(ClientError::Network)?;
        debug!(filename, size = bytes.len(), "download complete");

        Ok(Self {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    /// Writes the file into `dir`. Only the final path component of the
    /// server-supplied name is used.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        let name = Path::new(&self.filename)
            .file_name()
            .map_or_else(|| DEFAULT_TEMPLATE_FILENAME.into(), ToOwned::to_owned);
        let path = dir.join(name);
        fs::write(&path, &self.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Filename from a `Content-Disposition` value; quotes around the name are
/// optional.
#[must_use]
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let regex = DISPOSITION_FILENAME.as_ref()?;
    let name = regex.captures(header)?.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn filename_quoted() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="nilai_S2.xlsx""#).as_deref(),
            Some("nilai_S2.xlsx")
        );
    }

    #[test]
    fn filename_unquoted() {
        assert_eq!(
            filename_from_disposition("attachment; filename=nilai.xlsx; size=42").as_deref(),
            Some("nilai.xlsx")
        );
    }

    #[test]
    fn filename_missing() {
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("inline; filename=\"\""), None);
    }

    #[test]
    fn save_in_strips_directories() -> Result<()> {
        let dir = TempDir::new()?;
        let download = Download {
            filename: "../../etc/nilai.xlsx".to_string(),
            content_type: None,
            bytes: b"PK".to_vec(),
        };

        let path = download.save_in(dir.path())?;

        assert_eq!(path, dir.path().join("nilai.xlsx"));
        assert_eq!(fs::read(&path)?, b"PK");
        Ok(())
    }
}
