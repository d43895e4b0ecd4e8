mod common;

use anyhow::Result;
use common::{Harness, admin_user, can_bind_localhost, pendaftar_json, refused_url};
use pmb::{
    auth::AuthService,
    client::ApiClient,
    config::ApiConfig,
    guard::{Decision, RouteGuard},
    navigation::{Navigator, RecordingNavigator},
    session::{ExecutionContext, FileStore, KeyValueStore, Session, TOKEN_KEY, USER_KEY},
    types::{AdminCredentials, Identity, LoginCredentials, Role},
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn applicant_credentials() -> LoginCredentials {
    LoginCredentials {
        nomor_pendaftaran: "PMB-2024-0007".to_string(),
        kode_akses: SecretString::from("K0DE".to_string()),
    }
}

#[tokio::test]
async fn applicant_login_establishes_session() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "nomor_pendaftaran": "PMB-2024-0007",
            "kode_akses": "K0DE"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Login berhasil",
            "data": {"user": pendaftar_json(), "token": "t-applicant"}
        })))
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    let auth = AuthService::new(harness.client.clone());

    let response = auth.login_as_applicant(&applicant_credentials()).await;

    assert!(response.success);
    assert!(auth.has_role(Role::Pendaftar));
    assert_eq!(
        harness.session.get_token().map(|t| t.expose_secret().to_string()),
        Some("t-applicant".to_string())
    );
    assert!(harness.store.get(USER_KEY).is_some());

    let guard = RouteGuard::new(harness.session.clone());
    assert_eq!(guard.check("/pendaftar/biodata"), Decision::Allow);
    assert_eq!(guard.check("/admin/users"), Decision::Redirect("/pendaftar"));
    Ok(())
}

#[tokio::test]
async fn applicant_login_sends_no_authorization() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"user": pendaftar_json(), "token": "t-new"}
        })))
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    harness.sign_in("t-old", admin_user().into())?;
    let auth = AuthService::new(harness.client.clone());

    let _ = auth.login_as_applicant(&applicant_credentials()).await;

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    assert!(requests.iter().all(|r| r.headers.get("authorization").is_none()));
    Ok(())
}

#[tokio::test]
async fn staff_login_uses_returned_role() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": {
                    "id": 4,
                    "username": "staf.ti",
                    "name": "Staf TI",
                    "email": "ti@pmb.test",
                    "role": "prodi",
                    "prodi_id": 2
                },
                "token": "t-prodi"
            }
        })))
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    let auth = AuthService::new(harness.client.clone());

    let response = auth
        .login_as_staff(&AdminCredentials {
            username: "staf.ti".to_string(),
            password: SecretString::from("rahasia".to_string()),
        })
        .await;

    assert!(response.success);
    assert_eq!(harness.session.role(), Some(Role::Prodi));
    assert!(!auth.has_role(Role::Admin));
    Ok(())
}

#[tokio::test]
async fn failed_login_leaves_session_empty() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/admin/login"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "Username atau password salah",
            "errors": {"username": ["Username atau password salah"]}
        })))
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    let auth = AuthService::new(harness.client.clone());

    let response = auth
        .login_as_staff(&AdminCredentials {
            username: "admin".to_string(),
            password: SecretString::from("salah".to_string()),
        })
        .await;

    assert!(!response.success);
    assert_eq!(response.field_errors("username").len(), 1);
    assert!(!harness.session.is_authenticated());
    assert_eq!(harness.store.get(TOKEN_KEY), None);
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer t-123"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    harness.sign_in("t-123", admin_user().into())?;
    let auth = AuthService::new(harness.client.clone());

    auth.logout().await;

    assert!(!harness.session.is_authenticated());
    assert!(harness.session.get_token().is_none());
    assert_eq!(harness.navigator.last().as_deref(), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn logout_offline_still_clears_session() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let harness = Harness::new(&refused_url()?, ExecutionContext::Interactive)?;
    harness.sign_in("t-123", admin_user().into())?;
    let auth = AuthService::new(harness.client.clone());

    auth.logout().await;

    assert!(!harness.session.is_authenticated());
    assert_eq!(harness.store.get(USER_KEY), None);
    assert_eq!(harness.navigator.visited(), vec!["/login"]);
    Ok(())
}

#[tokio::test]
async fn cancelled_logout_still_clears_session() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    harness.sign_in("t-123", admin_user().into())?;
    let auth = AuthService::new(harness.client.clone());

    let finished = tokio::time::timeout(Duration::from_millis(200), auth.logout()).await;

    assert!(finished.is_err());
    assert!(harness.session.get_token().is_none());
    assert!(!harness.session.is_authenticated());
    assert_eq!(harness.navigator.visited(), vec!["/login"]);
    Ok(())
}

#[tokio::test]
async fn fetch_identity_refreshes_cached_user() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer t-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 1,
                "username": "admin",
                "name": "Admin Baru",
                "email": "admin@pmb.test",
                "role": "admin"
            }
        })))
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    harness.sign_in("t-123", admin_user().into())?;
    let auth = AuthService::new(harness.client.clone());

    let identity = auth.fetch_current_identity().await;

    assert_eq!(identity.as_ref().map(Identity::display_name), Some("Admin Baru"));
    assert_eq!(harness.session.role(), Some(Role::Admin));
    let stored = harness.store.get(USER_KEY).unwrap_or_default();
    assert!(stored.contains("Admin Baru"));
    Ok(())
}

#[tokio::test]
async fn fetch_identity_without_token_skips_request() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    let auth = AuthService::new(harness.client.clone());

    assert!(auth.fetch_current_identity().await.is_none());
    Ok(())
}

#[tokio::test]
async fn fetch_identity_failure_ends_session() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let harness = Harness::for_server(&server)?;
    harness.sign_in("t-123", admin_user().into())?;
    let auth = AuthService::new(harness.client.clone());

    assert!(auth.fetch_current_identity().await.is_none());
    assert!(!harness.session.is_authenticated());
    assert!(harness.session.get_token().is_none());
    Ok(())
}

#[tokio::test]
async fn fetch_identity_is_none_when_refresh_cannot_be_stored() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 1,
                "username": "admin",
                "name": "Admin Baru",
                "email": "admin@pmb.test",
                "role": "admin"
            }
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new()?;
    let session_dir = dir.path().join("state");
    std::fs::create_dir(&session_dir)?;
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(session_dir.join("session.json"))?);
    let session = Arc::new(Session::new(ExecutionContext::Interactive, storage));
    session.establish(&SecretString::from("t-123".to_string()), admin_user().into())?;

    let navigator: Arc<dyn Navigator> = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(&ApiConfig::new(&server.uri())?, session.clone(), navigator)?;
    let auth = AuthService::new(Arc::new(client));

    std::fs::remove_dir_all(&session_dir)?;

    assert!(auth.fetch_current_identity().await.is_none());
    assert_eq!(
        session.current_user().as_ref().map(Identity::display_name),
        Some("Administrator")
    );
    Ok(())
}
