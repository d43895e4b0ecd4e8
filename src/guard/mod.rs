//! Route guard evaluated before every navigation.
//!
//! Public pages are open to everyone. The applicant area (`/pendaftar`) needs
//! the `pendaftar` role, the staff area (`/admin`) needs `admin` or `prodi`.
//! Unauthenticated visitors are sent to the login page that matches the area
//! they tried to open. This is a UX guard only; the backend enforces access.
//!
//! Area matching is per path segment: `/admin` and `/admin/users` are in the
//! staff area, `/administrative` is not.

use crate::{
    navigation::{Navigator, routes},
    session::Session,
    types::Role,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

pub struct RouteGuard {
    session: Arc<Session>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Decides whether navigation to `destination` may proceed.
    #[must_use]
    pub fn check(&self, destination: &str) -> Decision {
        if !self.session.context().is_interactive() {
            return Decision::Allow;
        }

        self.session.init_session();

        let path = route_path(destination);
        let decision = decide(path, self.session.is_authenticated(), self.session.role());
        debug!(path, ?decision, "route guard");
        decision
    }

    /// Runs [`check`](Self::check) and performs the redirect, if any, through
    /// `navigator`. Returns whether the destination may render.
    pub fn enforce(&self, destination: &str, navigator: &dyn Navigator) -> bool {
        match self.check(destination) {
            Decision::Allow => true,
            Decision::Redirect(target) => {
                navigator.navigate_to(target);
                false
            }
        }
    }
}

fn decide(path: &str, authenticated: bool, role: Option<Role>) -> Decision {
    if is_public(path) {
        return Decision::Allow;
    }

    let in_admin = is_within(path, routes::ADMIN);
    let in_pendaftar = is_within(path, routes::PENDAFTAR);

    if !authenticated {
        return if in_admin {
            Decision::Redirect(routes::STAFF_LOGIN)
        } else {
            Decision::Redirect(routes::LOGIN)
        };
    }

    if in_pendaftar && role != Some(Role::Pendaftar) {
        return Decision::Redirect(routes::ADMIN);
    }
    if in_admin && !role.is_some_and(Role::is_staff) {
        return Decision::Redirect(routes::PENDAFTAR);
    }

    Decision::Allow
}

/// Path without query string or fragment.
fn route_path(destination: &str) -> &str {
    let end = destination.find(['?', '#']).unwrap_or(destination.len());
    &destination[..end]
}

fn is_public(path: &str) -> bool {
    let trimmed = match path.trim_end_matches('/') {
        "" => routes::HOME,
        trimmed => trimmed,
    };
    routes::PUBLIC.contains(&trimmed)
}

/// `path` is `area` itself or lies below it.
fn is_within(path: &str, area: &str) -> bool {
    path.strip_prefix(area)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::session::{ExecutionContext, KeyValueStore, MemoryStore};
    use crate::types::{Identity, Pendaftar, StaffRole, StatusKelulusan, StatusPendaftaran, User};
    use anyhow::Result;
    use secrecy::SecretString;

    fn applicant() -> Identity {
        Identity::Applicant(Pendaftar {
            id: 9,
            nomor_pendaftaran: "PMB-0009".to_string(),
            nama_lengkap: "Budi Santoso".to_string(),
            no_whatsapp: "0811".to_string(),
            tanggal_lahir: None,
            tempat_lahir: None,
            jenis_kelamin: None,
            alamat: None,
            pendidikan_terakhir: None,
            asal_institusi: None,
            foto_path: None,
            prodi_id: Some(1),
            prodi: None,
            jadwal_ujian_id: None,
            jadwal_ujian: None,
            periode_id: None,
            nilai_ujian: None,
            status_kelulusan: StatusKelulusan::BelumDiproses,
            status_pendaftaran: StatusPendaftaran::Registrasi,
            created_at: None,
        })
    }

    fn staff(role: StaffRole) -> Identity {
        Identity::Staff(User {
            id: 1,
            username: "staf".to_string(),
            name: "Staf".to_string(),
            email: "staf@pmb.test".to_string(),
            role,
            prodi_id: None,
            prodi: None,
        })
    }

    fn guard_for(identity: Option<Identity>) -> Result<RouteGuard> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = Arc::new(Session::new(ExecutionContext::Interactive, storage));
        if let Some(identity) = identity {
            session.establish(&SecretString::from("t-guard".to_string()), identity)?;
        }
        Ok(RouteGuard::new(session))
    }

    #[test]
    fn admin_route_unauthenticated_goes_to_staff_login() -> Result<()> {
        let guard = guard_for(None)?;
        assert_eq!(guard.check("/admin/users"), Decision::Redirect("/login/admin"));
        assert_eq!(guard.check("/admin"), Decision::Redirect("/login/admin"));
        Ok(())
    }

    #[test]
    fn other_routes_unauthenticated_go_to_applicant_login() -> Result<()> {
        let guard = guard_for(None)?;
        assert_eq!(guard.check("/pendaftar/biodata"), Decision::Redirect("/login"));
        assert_eq!(guard.check("/profil"), Decision::Redirect("/login"));
        Ok(())
    }

    #[test]
    fn public_routes_are_open() -> Result<()> {
        let guard = guard_for(None)?;
        for path in ["/", "/login", "/login/admin", "/register", "/cek-kelulusan"] {
            assert_eq!(guard.check(path), Decision::Allow, "{path}");
        }
        assert_eq!(guard.check("/login/"), Decision::Allow);
        assert_eq!(guard.check("/cek-kelulusan?nomor=PMB-1"), Decision::Allow);
        Ok(())
    }

    #[test]
    fn public_match_is_exact() -> Result<()> {
        let guard = guard_for(None)?;
        assert_eq!(guard.check("/register/confirm"), Decision::Redirect("/login"));
        Ok(())
    }

    #[test]
    fn applicant_can_open_applicant_area() -> Result<()> {
        let guard = guard_for(Some(applicant()))?;
        assert_eq!(guard.check("/pendaftar/biodata"), Decision::Allow);
        assert_eq!(guard.check("/pendaftar"), Decision::Allow);
        Ok(())
    }

    #[test]
    fn applicant_is_kept_out_of_admin_area() -> Result<()> {
        let guard = guard_for(Some(applicant()))?;
        assert_eq!(guard.check("/admin/users"), Decision::Redirect("/pendaftar"));
        Ok(())
    }

    #[test]
    fn staff_is_kept_out_of_applicant_area() -> Result<()> {
        for role in [StaffRole::Admin, StaffRole::Prodi] {
            let guard = guard_for(Some(staff(role)))?;
            assert_eq!(guard.check("/pendaftar/jadwal"), Decision::Redirect("/admin"));
            assert_eq!(guard.check("/admin/users"), Decision::Allow);
        }
        Ok(())
    }

    #[test]
    fn admin_prefix_is_segment_aware() -> Result<()> {
        let guard = guard_for(Some(applicant()))?;
        assert_eq!(guard.check("/administrative"), Decision::Allow);
        assert_eq!(guard.check("/pendaftaran-ulang"), Decision::Allow);

        let anonymous = guard_for(None)?;
        assert_eq!(anonymous.check("/administrative"), Decision::Redirect("/login"));
        Ok(())
    }

    #[test]
    fn prerender_allows_everything() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = Arc::new(Session::new(ExecutionContext::Prerender, storage));
        let guard = RouteGuard::new(session);
        assert_eq!(guard.check("/admin/users"), Decision::Allow);
    }

    #[test]
    fn guard_sees_session_written_by_another_instance() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        let writer: Arc<dyn KeyValueStore> = store.clone();
        Session::new(ExecutionContext::Interactive, writer)
            .establish(&SecretString::from("t-1".to_string()), staff(StaffRole::Admin))?;

        let reader: Arc<dyn KeyValueStore> = store.clone();
        let guard = RouteGuard::new(Arc::new(Session::new(ExecutionContext::Interactive, reader)));
        assert_eq!(guard.check("/admin"), Decision::Allow);

        store.remove(crate::session::USER_KEY)?;
        assert_eq!(guard.check("/admin"), Decision::Redirect("/login/admin"));
        Ok(())
    }

    #[test]
    fn enforce_navigates_on_redirect() -> Result<()> {
        let guard = guard_for(None)?;
        let navigator = RecordingNavigator::new();

        assert!(!guard.enforce("/admin/periode", &navigator));
        assert!(guard.enforce("/login", &navigator));
        assert_eq!(navigator.visited(), vec!["/login/admin"]);
        Ok(())
    }
}
