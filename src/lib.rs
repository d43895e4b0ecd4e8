//! # PMB Pascasarjana (admissions API client)
//!
//! `pmb` is the client-side data-access layer for the graduate admissions
//! backend. It wraps the REST API behind one HTTP client, keeps the login
//! session in a small persisted store, and decides route access for applicants
//! and staff.
//!
//! ## Composition
//!
//! The application root builds one [`session::Session`] and shares it by `Arc`:
//!
//! - [`client::ApiClient`] reads the bearer token from it, and clears it when the
//!   backend answers `401 Unauthorized`.
//! - [`auth::AuthService`] fills it on login and empties it on logout.
//! - [`guard::RouteGuard`] reads it before each navigation.
//!
//! Persistence goes through [`session::KeyValueStore`] and navigation through
//! [`navigation::Navigator`], so the whole flow runs without a browser.
//!
//! ## Response Envelope
//!
//! Every backend call returns an [`client::Envelope`]. Transport failures,
//! non-2xx statuses and undecodable payloads all become `success: false` with a
//! message; callers check `success` before reading `data`. The result-template
//! download is the only call that returns a `Result`.

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod guard;
pub mod navigation;
pub mod session;
pub mod types;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
