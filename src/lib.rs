#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Client SDK for the Rollcall education SSO provider
//!
//! Implements the provider's OAuth2 authorization-code flow (authorize URL,
//! code-for-token exchange, identity and profile fetches) and an account
//! reconciliation routine that classifies each login against the caller's own
//! user store as an existing, mergeable, or brand-new account.

/// Version of the rollcall SDK
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod reconcile;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use client::RollcallClient;
pub use config::RollcallConfig;
pub use errors::{ReconcileError, SsoError};
pub use http::{HttpClient, HttpError, ReqwestHttpClient};
pub use models::{
    IdentityDescriptor, Profile, ProfileName, ReconciliationOutcome, UserKind,
};
pub use reconcile::UserStore;
