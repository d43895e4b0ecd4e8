//! Login, logout and identity refresh on top of [`ApiClient`] and the shared
//! [`Session`]. Login calls are anonymous; credentials and tokens must never be
//! logged.
//!
//! Flow overview: applicants log in at `/auth/login` with their registration
//! number and access code, staff at `/auth/admin/login` with username and
//! password. Both return `{ user, token }`; the token and identity are stored
//! together. Logout always ends the local session, whatever the backend says.

use crate::{
    client::{ApiClient, Envelope},
    navigation::{Navigator, routes},
    session::Session,
    types::{AdminCredentials, Identity, LoginCredentials, LoginData, Pendaftar, Role, User},
};
use secrecy::SecretString;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const APPLICANT_LOGIN_ENDPOINT: &str = "/auth/login";
pub const STAFF_LOGIN_ENDPOINT: &str = "/auth/admin/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const ME_ENDPOINT: &str = "/auth/me";

pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        self.client.session()
    }

    /// Restores the session persisted by an earlier run.
    pub fn init_session(&self) {
        self.session().init_session();
    }

    /// Logs an applicant in. The session role is always `pendaftar`.
    pub async fn login_as_applicant(
        &self,
        credentials: &LoginCredentials,
    ) -> Envelope<LoginData<Pendaftar>> {
        let response: Envelope<LoginData<Pendaftar>> = self
            .client
            .post(APPLICANT_LOGIN_ENDPOINT, credentials, false)
            .await;

        self.establish(response, |data| {
            (data.token.clone(), Identity::Applicant(data.user.clone()))
        })
    }

    /// Logs a staff member in. The session role is the returned user's role.
    pub async fn login_as_staff(&self, credentials: &AdminCredentials) -> Envelope<LoginData<User>> {
        let response: Envelope<LoginData<User>> = self
            .client
            .post(STAFF_LOGIN_ENDPOINT, credentials, false)
            .await;

        self.establish(response, |data| {
            (data.token.clone(), Identity::Staff(data.user.clone()))
        })
    }

    fn establish<T>(
        &self,
        mut response: Envelope<T>,
        split: impl FnOnce(&T) -> (String, Identity),
    ) -> Envelope<T> {
        if !response.success {
            return response;
        }
        let Some(data) = response.data.as_ref() else {
            return response;
        };

        let (token, identity) = split(data);
        let role = identity.role();
        if let Err(err) = self.session().establish(&SecretString::from(token), identity) {
            warn!("failed to store session: {err:#}");
            response.success = false;
            response.message = Some(format!("{err:#}"));
            response.failure = Some(crate::client::FailureKind::Server);
            return response;
        }

        info!(%role, "logged in");
        response
    }

    /// Best-effort logout. The backend call may fail, hang or be cancelled;
    /// the local session is cleared and the login page requested in every case.
    pub async fn logout(&self) {
        let _cleanup = LogoutCleanup {
            session: self.session(),
            navigator: self.client.navigator().as_ref(),
        };

        let response: Envelope<Value> = self.client.post_empty(LOGOUT_ENDPOINT, true).await;
        if !response.success {
            debug!(
                "logout request failed: {}",
                response.message.as_deref().unwrap_or_default()
            );
        }
    }

    /// Refreshes the cached identity from `/auth/me`. Without a token this does
    /// nothing; a failed lookup ends the session. `None` also when the fresh
    /// identity could not be stored.
    pub async fn fetch_current_identity(&self) -> Option<Identity> {
        self.session().get_token()?;

        let response: Envelope<Identity> = self.client.get(ME_ENDPOINT, true).await;
        match response.into_data() {
            Some(identity) => match self.session().refresh_identity(identity) {
                Ok(()) => self.session().current_user(),
                Err(err) => {
                    warn!("failed to store refreshed identity: {err:#}");
                    None
                }
            },
            None => {
                debug!("identity lookup failed, clearing session");
                self.session().remove_token();
                None
            }
        }
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.session().has_role(role)
    }
}

/// Ends the local session when dropped, so logout completes even when its
/// future is dropped before the backend answers.
struct LogoutCleanup<'a> {
    session: &'a Session,
    navigator: &'a dyn Navigator,
}

impl Drop for LogoutCleanup<'_> {
    fn drop(&mut self) {
        self.session.remove_token();
        self.navigator.navigate_to(routes::LOGIN);
        info!("logged out");
    }
}
