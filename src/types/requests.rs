//! Request bodies and the smaller response payloads tied to a single endpoint.
//! Credential types hold their secret half as [`SecretString`] and expose it
//! only while the body is serialized.

use super::identity::{JenisKelamin, StatusKelulusan};
use super::master::StatusVerifikasi;
use super::dashboard::ProdiSummary;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Applicant login: registration number plus the access code issued at signup.
#[derive(Clone, Debug, Serialize)]
pub struct LoginCredentials {
    pub nomor_pendaftaran: String,
    #[serde(serialize_with = "serialize_secret")]
    pub kode_akses: SecretString,
}

/// Staff login.
#[derive(Clone, Debug, Serialize)]
pub struct AdminCredentials {
    pub username: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

/// `data` of both login endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginData<U> {
    pub user: U,
    pub token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub nama_lengkap: String,
    pub no_whatsapp: String,
    pub prodi_id: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterResult {
    pub nomor_pendaftaran: String,
    pub nama_lengkap: String,
    pub prodi: String,
    pub kode_akses: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateBiodataRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama_lengkap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempat_lahir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jenis_kelamin: Option<JenisKelamin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pendidikan_terakhir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asal_institusi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_whatsapp: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifikasiDokumenRequest {
    pub dokumen_id: u64,
    pub status: StatusVerifikasi,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
}

/// Public result lookup and the applicant's own result page.
#[derive(Clone, Debug, Deserialize)]
pub struct HasilKelulusan {
    pub nomor_pendaftaran: String,
    pub nama_lengkap: String,
    #[serde(default)]
    pub prodi: Option<ProdiSummary>,
    #[serde(default)]
    pub nilai_ujian: Option<f64>,
    pub status_kelulusan: String,
    #[serde(default)]
    pub status_label: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FotoUploaded {
    pub foto_path: String,
}

/// One row of the score sheet, both as served by `form-nilai` and as sent back
/// in a batch upload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarisNilai {
    pub nomor_pendaftaran: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_lengkap: Option<String>,
    pub nilai: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UploadRowError {
    #[serde(default)]
    pub row: Option<u64>,
    #[serde(default)]
    pub nomor_pendaftaran: Option<String>,
    pub message: String,
}

/// Outcome of a batch score upload.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadNilaiResult {
    pub success: u64,
    pub failed: u64,
    #[serde(default)]
    pub errors: Vec<UploadRowError>,
}

/// Notification sent to an applicant: the standard result message, or a custom
/// one with its own subject and body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notifikasi {
    Hasil,
    Custom { subject: String, message: String },
}

impl Serialize for Notifikasi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Payload<'a> {
            #[serde(rename = "type")]
            kind: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            subject: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            message: Option<&'a str>,
        }

        let payload = match self {
            Self::Hasil => Payload {
                kind: "hasil",
                subject: None,
                message: None,
            },
            Self::Custom { subject, message } => Payload {
                kind: "custom",
                subject: Some(subject),
                message: Some(message),
            },
        };
        payload.serialize(serializer)
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct InputNilai {
    pub nilai_ujian: f64,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SetStatusKelulusan {
    pub status_kelulusan: StatusKelulusan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn credentials_expose_secret_only_in_body() -> Result<()> {
        let credentials = AdminCredentials {
            username: "admin".to_string(),
            password: SecretString::from("hunter2".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&credentials)?,
            json!({"username": "admin", "password": "hunter2"})
        );
        assert!(!format!("{credentials:?}").contains("hunter2"));
        Ok(())
    }

    #[test]
    fn hasil_notification_has_no_subject() -> Result<()> {
        assert_eq!(serde_json::to_value(Notifikasi::Hasil)?, json!({"type": "hasil"}));
        let custom = Notifikasi::Custom {
            subject: "Jadwal".to_string(),
            message: "Ujian dipindah".to_string(),
        };
        assert_eq!(
            serde_json::to_value(custom)?,
            json!({"type": "custom", "subject": "Jadwal", "message": "Ujian dipindah"})
        );
        Ok(())
    }

    #[test]
    fn biodata_update_skips_unset_fields() -> Result<()> {
        let update = UpdateBiodataRequest {
            alamat: Some("Jl. Merdeka 1".to_string()),
            ..UpdateBiodataRequest::default()
        };
        assert_eq!(serde_json::to_value(update)?, json!({"alamat": "Jl. Merdeka 1"}));
        Ok(())
    }
}
