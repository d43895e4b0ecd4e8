//! Login session shared by the client, the auth service and the route guard.
//!
//! The token and the identity it belongs to are persisted under two keys
//! ([`TOKEN_KEY`], [`USER_KEY`]) in a [`KeyValueStore`], and mirrored in memory
//! as the current user and role. Both halves are written and cleared while the
//! session's write lock is held, so a reader never sees a token without its
//! identity or the other way round.
//!
//! In a [`ExecutionContext::Prerender`] context storage is never read or
//! written: prerendered output is always anonymous.

mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

use crate::types::{Identity, Role};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "auth_user";

/// Where the data layer is running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A live client: storage is available and navigation is possible.
    #[default]
    Interactive,
    /// Non-interactive server rendering.
    Prerender,
}

impl ExecutionContext {
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

#[derive(Clone, Debug, Default)]
struct SessionState {
    user: Option<Identity>,
    role: Option<Role>,
}

impl SessionState {
    fn signed_in(identity: Identity) -> Self {
        let role = identity.role();
        Self {
            user: Some(identity),
            role: Some(role),
        }
    }
}

pub struct Session {
    context: ExecutionContext,
    storage: Arc<dyn KeyValueStore>,
    state: RwLock<SessionState>,
}

impl Session {
    #[must_use]
    pub fn new(context: ExecutionContext, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            context,
            storage,
            state: RwLock::new(SessionState::default()),
        }
    }

    #[must_use]
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Persisted bearer token; always `None` while prerendering.
    #[must_use]
    pub fn get_token(&self) -> Option<SecretString> {
        if !self.context.is_interactive() {
            return None;
        }
        let _state = self.read_state();
        self.storage.get(TOKEN_KEY).map(SecretString::from)
    }

    /// # Errors
    /// Returns an error if the token cannot be persisted.
    pub fn set_token(&self, token: &SecretString) -> Result<()> {
        if !self.context.is_interactive() {
            return Ok(());
        }
        let _state = self.write_state();
        self.storage
            .set(TOKEN_KEY, token.expose_secret())
            .context("Failed to persist session token")
    }

    /// Clears the token and the cached identity together. Storage failures are
    /// logged; the in-memory session is cleared regardless.
    pub fn remove_token(&self) {
        let mut state = self.write_state();
        self.clear_locked(&mut state);
    }

    /// Rebuilds the in-memory session from storage. A token without a cached
    /// identity leaves the session signed out; a cached identity that does not
    /// parse discards the token as well.
    pub fn init_session(&self) {
        if !self.context.is_interactive() {
            return;
        }

        let mut state = self.write_state();
        let token = self.storage.get(TOKEN_KEY);
        let stored_user = self.storage.get(USER_KEY);

        let (Some(_), Some(stored_user)) = (token, stored_user) else {
            *state = SessionState::default();
            return;
        };

        match serde_json::from_str::<Identity>(&stored_user) {
            Ok(identity) => {
                debug!(role = %identity.role(), "session restored from storage");
                *state = SessionState::signed_in(identity);
            }
            Err(err) => {
                warn!("discarding session with malformed cached identity: {err}");
                self.clear_locked(&mut state);
            }
        }
    }

    /// Signs in: stores token and identity and derives the role from the
    /// identity. If either half cannot be stored both are cleared.
    ///
    /// # Errors
    /// Returns an error if either half cannot be persisted.
    pub fn establish(&self, token: &SecretString, identity: Identity) -> Result<()> {
        let mut state = self.write_state();

        if self.context.is_interactive() {
            let stored_user =
                serde_json::to_string(&identity).context("Failed to encode identity")?;
            if let Err(err) = self.storage.set(TOKEN_KEY, token.expose_secret()) {
                self.clear_locked(&mut state);
                return Err(err).context("Failed to persist session token");
            }
            if let Err(err) = self.storage.set(USER_KEY, &stored_user) {
                self.clear_locked(&mut state);
                return Err(err).context("Failed to persist session identity");
            }
        }

        *state = SessionState::signed_in(identity);
        Ok(())
    }

    /// Replaces the cached identity and role, keeping the current token.
    ///
    /// # Errors
    /// Returns an error if the identity cannot be persisted.
    pub fn refresh_identity(&self, identity: Identity) -> Result<()> {
        let mut state = self.write_state();

        if self.context.is_interactive() {
            if self.storage.get(TOKEN_KEY).is_none() {
                self.clear_locked(&mut state);
                return Ok(());
            }
            let stored_user =
                serde_json::to_string(&identity).context("Failed to encode identity")?;
            self.storage
                .set(USER_KEY, &stored_user)
                .context("Failed to persist session identity")?;
        }

        *state = SessionState::signed_in(identity);
        Ok(())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_state().user.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.read_state().role
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<Identity> {
        self.read_state().user.clone()
    }

    fn clear_locked(&self, state: &mut SessionState) {
        *state = SessionState::default();

        if !self.context.is_interactive() {
            return;
        }
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!("failed to remove {key} from session storage: {err:#}");
            }
        }
    }

    // The state is plain data; recovering it from a poisoned lock is safe.
    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
