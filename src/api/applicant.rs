//! Applicant self-service, plus the two public forms (registration and the
//! result lookup) that run before an applicant has a session.

use crate::{
    client::{ApiClient, Envelope},
    types::{
        Dokumen, FotoUploaded, HasilKelulusan, JadwalUjian, JenisDokumen, Pendaftar,
        PendaftarDashboard, RegisterRequest, RegisterResult, UpdateBiodataRequest,
    },
};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use std::sync::Arc;

pub struct ApplicantApi {
    client: Arc<ApiClient>,
}

impl ApplicantApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Creates an applicant account. The returned access code is shown once.
    pub async fn register(&self, request: &RegisterRequest) -> Envelope<RegisterResult> {
        self.client.post("/register", request, false).await
    }

    /// Public result lookup by registration number and date of birth.
    pub async fn cek_kelulusan(
        &self,
        nomor_pendaftaran: &str,
        tanggal_lahir: &str,
    ) -> Envelope<HasilKelulusan> {
        let body = json!({
            "nomor_pendaftaran": nomor_pendaftaran,
            "tanggal_lahir": tanggal_lahir,
        });
        self.client.post("/cek-kelulusan", &body, false).await
    }

    pub async fn dashboard(&self) -> Envelope<PendaftarDashboard> {
        self.client.get("/pendaftar/dashboard", true).await
    }

    pub async fn biodata(&self) -> Envelope<Pendaftar> {
        self.client.get("/pendaftar/biodata", true).await
    }

    pub async fn update_biodata(&self, update: &UpdateBiodataRequest) -> Envelope<Pendaftar> {
        self.client.put("/pendaftar/biodata", update, true).await
    }

    pub async fn upload_dokumen(&self, file: Part, jenis: JenisDokumen) -> Envelope<Dokumen> {
        let form = Form::new()
            .part("file", file)
            .text("jenis_dokumen", jenis.as_str());
        self.client.upload("/pendaftar/dokumen", form).await
    }

    pub async fn upload_foto(&self, foto: Part) -> Envelope<FotoUploaded> {
        let form = Form::new().part("foto", foto);
        self.client.upload("/pendaftar/foto", form).await
    }

    /// Schedules the applicant may still choose from.
    pub async fn jadwal_list(&self) -> Envelope<Vec<JadwalUjian>> {
        self.client.get("/pendaftar/jadwal", true).await
    }

    pub async fn pilih_jadwal(&self, jadwal_ujian_id: u64) -> Envelope<Value> {
        let body = json!({ "jadwal_ujian_id": jadwal_ujian_id });
        self.client.post("/pendaftar/pilih-jadwal", &body, true).await
    }

    /// Registration card data, `{ kartu: ... }`.
    pub async fn kartu(&self) -> Envelope<Value> {
        self.client.get("/pendaftar/kartu", true).await
    }

    pub async fn hasil(&self) -> Envelope<HasilKelulusan> {
        self.client.get("/pendaftar/hasil", true).await
    }
}
