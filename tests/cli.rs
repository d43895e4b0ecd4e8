mod common;

use anyhow::Result;
use common::{can_bind_localhost, pendaftar_json};
use pmb::{
    cli::{
        actions::{
            Action,
            nilai::TemplateArgs,
            session::{Credentials, LoginArgs},
        },
        globals::GlobalArgs,
    },
    guard::{Decision, RouteGuard},
    types::LoginCredentials,
};
use secrecy::SecretString;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_persists_session_for_later_runs() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"user": pendaftar_json(), "token": "t-cli"}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new()?;
    let globals = GlobalArgs::new(server.uri(), dir.path().join("session.json"));

    Action::Login(LoginArgs {
        globals: globals.clone(),
        credentials: Credentials::Applicant(LoginCredentials {
            nomor_pendaftaran: "PMB-2024-0007".to_string(),
            kode_akses: SecretString::from("K0DE".to_string()),
        }),
    })
    .execute()
    .await?;

    assert!(globals.session_file.exists());

    let client = globals.connect()?;
    assert!(client.session().is_authenticated());
    let guard = RouteGuard::new(client.session().clone());
    assert_eq!(guard.check("/pendaftar"), Decision::Allow);
    assert_eq!(guard.check("/admin"), Decision::Redirect("/pendaftar"));

    Action::Logout(globals.clone()).execute().await?;
    assert!(!globals.session_file.exists());
    Ok(())
}

#[tokio::test]
async fn rejected_login_is_an_error() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Nomor pendaftaran atau kode akses salah"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new()?;
    let globals = GlobalArgs::new(server.uri(), dir.path().join("session.json"));

    let result = Action::Login(LoginArgs {
        globals,
        credentials: Credentials::Applicant(LoginCredentials {
            nomor_pendaftaran: "PMB-2024-0007".to_string(),
            kode_akses: SecretString::from("salah".to_string()),
        }),
    })
    .execute()
    .await;

    let message = result.err().map(|err| err.to_string()).unwrap_or_default();
    assert_eq!(message, "Nomor pendaftaran atau kode akses salah");
    Ok(())
}

#[tokio::test]
async fn me_without_session_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let globals = GlobalArgs::new(
        "http://localhost:8000".to_string(),
        dir.path().join("session.json"),
    );

    let result = Action::Me(globals).execute().await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn template_is_saved_in_output_directory() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/prodi/form-nilai"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=nilai_MM.xlsx")
                .set_body_bytes(b"PK".to_vec()),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new()?;
    let globals = GlobalArgs::new(server.uri(), dir.path().join("session.json"));

    Action::Template(TemplateArgs {
        globals,
        include_status: true,
        out: dir.path().to_path_buf(),
    })
    .execute()
    .await?;

    assert_eq!(std::fs::read(dir.path().join("nilai_MM.xlsx"))?, b"PK");
    Ok(())
}
