//! Master data managed by administrators: study programs, registration periods,
//! exam sessions, rooms, schedules, and uploaded documents.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jenjang {
    S2,
    S3,
}

/// Study program.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prodi {
    pub id: u64,
    pub kode: String,
    pub nama: String,
    pub jenjang: Jenjang,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pendaftar_count: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodePendaftaran {
    pub id: u64,
    pub nama: String,
    pub tanggal_buka: String,
    pub tanggal_tutup: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pendaftar_count: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SesiUjian {
    pub id: u64,
    pub nama: String,
    pub jam_mulai: String,
    pub jam_selesai: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuangUjian {
    pub id: u64,
    pub kode: String,
    pub nama: String,
    pub kapasitas: u32,
    pub is_active: bool,
}

/// Exam schedule slot: a date, a session and a room with a seat quota.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JadwalUjian {
    pub id: u64,
    pub periode_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periode: Option<PeriodePendaftaran>,
    pub tanggal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tanggal_formatted: Option<String>,
    pub sesi_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sesi: Option<SesiUjian>,
    pub ruang_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruang: Option<RuangUjian>,
    pub kuota: u32,
    pub terisi: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sisa_kuota: Option<u32>,
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JenisDokumen {
    Ijazah,
    Transkrip,
    Ktp,
    PasFoto,
    SuratRekomendasi,
    Proposal,
    Lainnya,
}

impl JenisDokumen {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ijazah => "ijazah",
            Self::Transkrip => "transkrip",
            Self::Ktp => "ktp",
            Self::PasFoto => "pas_foto",
            Self::SuratRekomendasi => "surat_rekomendasi",
            Self::Proposal => "proposal",
            Self::Lainnya => "lainnya",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusVerifikasi {
    #[default]
    Pending,
    Valid,
    TidakValid,
}

/// Uploaded applicant document and its verification state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dokumen {
    pub id: u64,
    pub pendaftar_id: u64,
    pub jenis_dokumen: JenisDokumen,
    pub file_name: String,
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub file_size: u64,
    #[serde(default)]
    pub status_verifikasi: StatusVerifikasi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
