#![allow(dead_code)]

use anyhow::Result;
use pmb::{
    client::ApiClient,
    config::ApiConfig,
    navigation::{Navigator, RecordingNavigator},
    session::{ExecutionContext, KeyValueStore, MemoryStore, Session},
    types::{Identity, StaffRole, User},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use std::{net::TcpListener, sync::Arc};
use wiremock::{MockServer, Request};

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub session: Arc<Session>,
    pub navigator: Arc<RecordingNavigator>,
    pub client: Arc<ApiClient>,
}

impl Harness {
    pub fn new(base_url: &str, context: ExecutionContext) -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let storage: Arc<dyn KeyValueStore> = store.clone();
        let session = Arc::new(Session::new(context, storage));
        let navigator = Arc::new(RecordingNavigator::new());
        let nav: Arc<dyn Navigator> = navigator.clone();
        let config = ApiConfig::new(base_url)?;
        let client = Arc::new(ApiClient::new(&config, session.clone(), nav)?);

        Ok(Self {
            store,
            session,
            navigator,
            client,
        })
    }

    pub fn for_server(server: &MockServer) -> Result<Self> {
        Self::new(&server.uri(), ExecutionContext::Interactive)
    }

    pub fn sign_in(&self, token: &str, identity: Identity) -> Result<()> {
        self.session
            .establish(&SecretString::from(token.to_string()), identity)
    }
}

pub fn admin_user() -> User {
    User {
        id: 1,
        username: "admin".to_string(),
        name: "Administrator".to_string(),
        email: "admin@pmb.test".to_string(),
        role: StaffRole::Admin,
        prodi_id: None,
        prodi: None,
    }
}

pub fn pendaftar_json() -> Value {
    json!({
        "id": 7,
        "nomor_pendaftaran": "PMB-2024-0007",
        "nama_lengkap": "Siti Aminah",
        "no_whatsapp": "081234567890",
        "prodi_id": 2,
        "status_kelulusan": "belum_diproses",
        "status_pendaftaran": "registrasi"
    })
}

/// URL of a local port nothing listens on.
pub fn refused_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}"))
}

pub async fn only_request(server: &MockServer) -> Option<Request> {
    let mut requests = server.received_requests().await?;
    if requests.len() == 1 { requests.pop() } else { None }
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}
