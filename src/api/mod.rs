//! Typed wrappers over [`ApiClient`] for each area of the backend. They only
//! fix endpoints, verbs and payload types; every call still returns an
//! [`Envelope`](crate::client::Envelope).

pub mod admin;
pub mod applicant;
pub mod prodi;
pub mod staff;

pub use admin::{AdminApi, Collection};
pub use applicant::ApplicantApi;
pub use prodi::ProdiCatalog;
pub use staff::StaffApi;

use crate::types::{StatusKelulusan, StatusPendaftaran};
use anyhow::{Context, Result};
use reqwest::multipart::Part;
use std::path::Path;
use url::form_urlencoded;

/// Query string builder that drops unset and empty values.
#[derive(Clone, Debug, Default)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.pairs.push((key, value));
            }
        }
        self
    }

    /// `endpoint` with the encoded query appended, or unchanged when empty.
    #[must_use]
    pub fn apply(&self, endpoint: &str) -> String {
        if self.pairs.is_empty() {
            return endpoint.to_string();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(key, value)| (*key, value.as_str())))
            .finish();
        format!("{endpoint}?{encoded}")
    }
}

/// Filters for the paginated applicant lists. `prodi_id` and `periode_id` are
/// only honoured by the administrator listing; study-program staff always see
/// their own program.
#[derive(Clone, Debug, Default)]
pub struct PendaftarFilter {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub prodi_id: Option<u64>,
    pub periode_id: Option<u64>,
    pub status_pendaftaran: Option<StatusPendaftaran>,
    pub status_kelulusan: Option<StatusKelulusan>,
    pub search: Option<String>,
}

impl PendaftarFilter {
    #[must_use]
    pub fn to_query(&self) -> Query {
        Query::new()
            .param("page", self.page)
            .param("per_page", self.per_page)
            .param("prodi_id", self.prodi_id)
            .param("periode_id", self.periode_id)
            .param("status_pendaftaran", self.status_pendaftaran.map(StatusPendaftaran::as_str))
            .param("status_kelulusan", self.status_kelulusan.map(StatusKelulusan::as_str))
            .param("search", self.search.as_deref())
    }
}

/// Multipart file part read from disk, named after the file.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub async fn file_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());
    Ok(Part::bytes(bytes).file_name(name))
}
