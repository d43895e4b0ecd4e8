//! Authenticated identities and roles. A staff account and an applicant account
//! come back from different login endpoints with different shapes; both end up
//! cached in the session as an [`Identity`].

use super::master::{JadwalUjian, Prodi};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Route-access role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Prodi,
    Pendaftar,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Prodi => "prodi",
            Self::Pendaftar => "pendaftar",
        }
    }

    /// Admin and study-program staff share the `/admin` area.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Prodi)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Roles a staff account can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Prodi,
}

impl From<StaffRole> for Role {
    fn from(role: StaffRole) -> Self {
        match role {
            StaffRole::Admin => Self::Admin,
            StaffRole::Prodi => Self::Prodi,
        }
    }
}

/// Staff account (administrator or study-program staff).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prodi_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prodi: Option<Prodi>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JenisKelamin {
    L,
    P,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKelulusan {
    Lulus,
    TidakLulus,
    #[default]
    BelumDiproses,
}

impl StatusKelulusan {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lulus => "lulus",
            Self::TidakLulus => "tidak_lulus",
            Self::BelumDiproses => "belum_diproses",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPendaftaran {
    #[default]
    Registrasi,
    BiodataLengkap,
    JadwalDipilih,
    Selesai,
}

impl StatusPendaftaran {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registrasi => "registrasi",
            Self::BiodataLengkap => "biodata_lengkap",
            Self::JadwalDipilih => "jadwal_dipilih",
            Self::Selesai => "selesai",
        }
    }
}

/// Applicant account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pendaftar {
    pub id: u64,
    pub nomor_pendaftaran: String,
    pub nama_lengkap: String,
    #[serde(default)]
    pub no_whatsapp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tanggal_lahir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempat_lahir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jenis_kelamin: Option<JenisKelamin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pendidikan_terakhir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asal_institusi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prodi_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prodi: Option<Prodi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jadwal_ujian_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jadwal_ujian: Option<JadwalUjian>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periode_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nilai_ujian: Option<f64>,
    #[serde(default)]
    pub status_kelulusan: StatusKelulusan,
    #[serde(default)]
    pub status_pendaftaran: StatusPendaftaran,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Whoever is logged in. Staff records are tried first because they carry the
/// `role` field applicants lack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    Staff(User),
    Applicant(Pendaftar),
}

impl Identity {
    /// Role implied by the record; records without a staff role are applicants.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Staff(user) => user.role.into(),
            Self::Applicant(_) => Role::Pendaftar,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Staff(user) => &user.name,
            Self::Applicant(pendaftar) => &pendaftar.nama_lengkap,
        }
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self::Staff(user)
    }
}

impl From<Pendaftar> for Identity {
    fn from(pendaftar: Pendaftar) -> Self {
        Self::Applicant(pendaftar)
    }
}
