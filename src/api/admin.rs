//! Administrator endpoints under `/admin`.

use super::{PendaftarFilter, Query};
use crate::{
    client::{ApiClient, Envelope, PagedEnvelope},
    types::{
        AdminDashboard, JadwalUjian, Pendaftar, PeriodePendaftaran, RuangUjian, SesiUjian,
        StaffRole, User,
    },
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{marker::PhantomData, sync::Arc};

/// A master-data collection with the usual list/create/update/delete verbs.
pub struct Collection<'a, T> {
    client: &'a ApiClient,
    path: &'static str,
    record: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> Collection<'a, T> {
    fn new(client: &'a ApiClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            record: PhantomData,
        }
    }

    pub async fn list(&self) -> Envelope<Vec<T>> {
        self.client.get(self.path, true).await
    }

    pub async fn list_where(&self, query: &Query) -> Envelope<Vec<T>> {
        self.client.get(&query.apply(self.path), true).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Envelope<T> {
        self.client.post(self.path, body, true).await
    }

    pub async fn update<B: Serialize + ?Sized>(&self, id: u64, body: &B) -> Envelope<T> {
        self.client.put(&format!("{}/{id}", self.path), body, true).await
    }

    pub async fn delete(&self, id: u64) -> Envelope<Value> {
        self.client.delete(&format!("{}/{id}", self.path), true).await
    }
}

pub struct AdminApi {
    client: Arc<ApiClient>,
}

impl AdminApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> Envelope<AdminDashboard> {
        self.client.get("/admin/dashboard", true).await
    }

    #[must_use]
    pub fn periode(&self) -> Collection<'_, PeriodePendaftaran> {
        Collection::new(&self.client, "/admin/periode")
    }

    #[must_use]
    pub fn sesi(&self) -> Collection<'_, SesiUjian> {
        Collection::new(&self.client, "/admin/sesi")
    }

    #[must_use]
    pub fn ruang(&self) -> Collection<'_, RuangUjian> {
        Collection::new(&self.client, "/admin/ruang")
    }

    #[must_use]
    pub fn jadwal(&self) -> Collection<'_, JadwalUjian> {
        Collection::new(&self.client, "/admin/jadwal")
    }

    #[must_use]
    pub fn users(&self) -> Collection<'_, User> {
        Collection::new(&self.client, "/admin/users")
    }

    /// Schedules, optionally limited to one registration period.
    pub async fn jadwal_list(&self, periode_id: Option<u64>) -> Envelope<Vec<JadwalUjian>> {
        self.jadwal()
            .list_where(&Query::new().param("periode_id", periode_id))
            .await
    }

    /// Staff accounts, optionally limited to one role.
    pub async fn user_list(&self, role: Option<StaffRole>) -> Envelope<Vec<User>> {
        let role = role.map(|role| crate::types::Role::from(role).as_str());
        self.users().list_where(&Query::new().param("role", role)).await
    }

    pub async fn pendaftar_list(&self, filter: &PendaftarFilter) -> PagedEnvelope<Pendaftar> {
        let endpoint = filter.to_query().apply("/admin/pendaftar");
        self.client.get_paged(&endpoint, true).await
    }

    pub async fn pendaftar_detail(&self, id: u64) -> Envelope<Value> {
        self.client.get(&format!("/admin/pendaftar/{id}"), true).await
    }
}
