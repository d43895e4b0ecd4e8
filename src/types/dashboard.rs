//! Dashboard summaries for applicants and administrators.

use super::identity::StatusPendaftaran;
use super::master::PeriodePendaftaran;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendaftarSummary {
    pub nomor_pendaftaran: String,
    pub nama_lengkap: String,
    pub status_pendaftaran: StatusPendaftaran,
    pub status_kelulusan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nilai_ujian: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProdiSummary {
    pub nama: String,
    pub jenjang: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JadwalSummary {
    pub tanggal: String,
    pub sesi: String,
    pub jam: String,
    pub ruang: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DokumenSummary {
    pub total: u32,
    pub valid: u32,
    pub pending: u32,
    pub tidak_valid: u32,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendaftarDashboard {
    pub pendaftar: PendaftarSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prodi: Option<ProdiSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jadwal_ujian: Option<JadwalSummary>,
    pub biodata_lengkap: bool,
    pub dokumen_lengkap: bool,
    #[serde(default)]
    pub dokumen: DokumenSummary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendaftarPerProdi {
    pub prodi: String,
    pub jenjang: String,
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub total_pendaftar: u64,
    pub total_prodi: u64,
    pub total_users: u64,
    #[serde(default)]
    pub pendaftar_by_prodi: Vec<PendaftarPerProdi>,
    #[serde(default)]
    pub pendaftar_by_status: HashMap<String, u64>,
    #[serde(default)]
    pub kelulusan_by_status: HashMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periode_aktif: Option<PeriodePendaftaran>,
}
