//! Study-program staff endpoints under `/prodi`: applicant review, scoring,
//! notifications, document verification and the score sheet round trip.

use super::PendaftarFilter;
use crate::{
    client::{
        ApiClient, ClientError, DEFAULT_TEMPLATE_FILENAME, Download, Envelope, PagedEnvelope,
        SPREADSHEET_MIME,
    },
    types::{
        BarisNilai, Dokumen, Notifikasi, Pendaftar, StatusKelulusan, UploadNilaiResult,
        VerifikasiDokumenRequest,
        requests::{InputNilai, SetStatusKelulusan},
    },
};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use std::sync::Arc;

pub const FORM_NILAI_ENDPOINT: &str = "/prodi/form-nilai";
pub const UPLOAD_NILAI_ENDPOINT: &str = "/prodi/upload-nilai";

pub struct StaffApi {
    client: Arc<ApiClient>,
}

impl StaffApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> Envelope<Value> {
        self.client.get("/prodi/dashboard", true).await
    }

    /// Applicants of the staff member's own program, with the program's
    /// status counters in `statistics`.
    pub async fn pendaftar_list(&self, filter: &PendaftarFilter) -> PagedEnvelope<Pendaftar> {
        let endpoint = filter.to_query().apply("/prodi/pendaftar");
        self.client.get_paged(&endpoint, true).await
    }

    /// Applicant with program, schedule, period and documents.
    pub async fn pendaftar_detail(&self, id: u64) -> Envelope<Value> {
        self.client.get(&format!("/prodi/pendaftar/{id}"), true).await
    }

    pub async fn input_nilai(&self, id: u64, nilai_ujian: f64) -> Envelope<Pendaftar> {
        let body = InputNilai { nilai_ujian };
        self.client
            .put(&format!("/prodi/pendaftar/{id}/nilai"), &body, true)
            .await
    }

    pub async fn set_status_kelulusan(
        &self,
        id: u64,
        status_kelulusan: StatusKelulusan,
    ) -> Envelope<Pendaftar> {
        let body = SetStatusKelulusan { status_kelulusan };
        self.client
            .put(&format!("/prodi/pendaftar/{id}/status"), &body, true)
            .await
    }

    pub async fn kirim_notifikasi(&self, id: u64, notifikasi: &Notifikasi) -> Envelope<Value> {
        self.client
            .post(&format!("/prodi/notifikasi/{id}"), notifikasi, true)
            .await
    }

    pub async fn verifikasi_dokumen(
        &self,
        pendaftar_id: u64,
        request: &VerifikasiDokumenRequest,
    ) -> Envelope<Dokumen> {
        self.client
            .put(&format!("/prodi/verifikasi/{pendaftar_id}"), request, true)
            .await
    }

    /// Score sheet rows as JSON.
    pub async fn form_nilai(&self) -> Envelope<Vec<BarisNilai>> {
        self.client.get(FORM_NILAI_ENDPOINT, true).await
    }

    /// Score sheet as a spreadsheet, optionally with the pass/fail column.
    ///
    /// # Errors
    /// Returns the transport or status failure of the download.
    pub async fn download_template(&self, include_status: bool) -> Result<Download, ClientError> {
        let endpoint = format!("{FORM_NILAI_ENDPOINT}?include_status={include_status}");
        self.client
            .download(&endpoint, SPREADSHEET_MIME, DEFAULT_TEMPLATE_FILENAME)
            .await
    }

    /// Batch score update from a filled-in spreadsheet.
    pub async fn upload_nilai_file(&self, file: Part) -> Envelope<UploadNilaiResult> {
        let form = Form::new().part("file", file);
        self.client.upload(UPLOAD_NILAI_ENDPOINT, form).await
    }

    /// Batch score update from rows, sent as `{ data: [...] }`.
    pub async fn upload_nilai_rows(&self, rows: &[BarisNilai]) -> Envelope<UploadNilaiResult> {
        let body = json!({ "data": rows });
        self.client.post(UPLOAD_NILAI_ENDPOINT, &body, true).await
    }
}
