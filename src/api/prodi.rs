//! Study-program catalog. The plain listing is public and used by the
//! registration form; the `/admin/prodi` family manages the catalog.

use crate::{
    client::{ApiClient, Envelope},
    types::Prodi,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub struct ProdiCatalog {
    client: Arc<ApiClient>,
}

impl ProdiCatalog {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Active programs, fetched anonymously.
    pub async fn list(&self) -> Envelope<Vec<Prodi>> {
        self.client.get("/prodi", false).await
    }

    /// All programs with their applicant counts.
    pub async fn list_all(&self) -> Envelope<Vec<Prodi>> {
        self.client.get("/admin/prodi", true).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Envelope<Prodi> {
        self.client.post("/admin/prodi", body, true).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: u64, body: &B) -> Envelope<Prodi> {
        self.client.put(&format!("/admin/prodi/{id}"), body, true).await
    }

    pub async fn delete(&self, id: u64) -> Envelope<Value> {
        self.client.delete(&format!("/admin/prodi/{id}"), true).await
    }
}
