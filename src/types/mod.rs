//! Records exchanged with the admissions backend. Field names follow the
//! backend's JSON verbatim.

pub mod dashboard;
pub mod identity;
pub mod master;
pub mod requests;

pub use dashboard::{AdminDashboard, PendaftarDashboard};
pub use identity::{
    Identity, JenisKelamin, Pendaftar, Role, StaffRole, StatusKelulusan, StatusPendaftaran, User,
};
pub use master::{
    Dokumen, JadwalUjian, JenisDokumen, Jenjang, PeriodePendaftaran, Prodi, RuangUjian,
    SesiUjian, StatusVerifikasi,
};
pub use requests::{
    AdminCredentials, BarisNilai, FotoUploaded, HasilKelulusan, LoginCredentials, LoginData,
    Notifikasi, RegisterRequest, RegisterResult, UpdateBiodataRequest, UploadNilaiResult,
    VerifikasiDokumenRequest,
};
