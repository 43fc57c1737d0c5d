//! Testing utilities for the Rollcall SDK
//!
//! Consolidates the mock transport, mock user stores, and canned provider
//! payloads used by unit and integration tests.
//!
//! - [`mock`] - Mock transport and user-store implementations
//! - [`fixtures`] - Pre-built configurations and provider JSON payloads
//!
//! Compiled under `cfg(test)` and behind the `testing` feature so integration
//! tests can opt in without shipping any of this to consumers.

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;
pub use mock::{MemoryUserStore, MockHttpClient, RecordedRequest};

/// Common test constants
pub mod constants {
    /// Default test client id
    pub const TEST_CLIENT_ID: &str = "test_client_id";

    /// Default test client secret
    pub const TEST_CLIENT_SECRET: &str = "test_client_secret";

    /// Default test redirect URI
    pub const TEST_REDIRECT_URI: &str = "https://app.example.com/sso/callback";

    /// Provider id used by the canned teacher identity
    pub const TEST_PROVIDER_ID: &str = "T1";

    /// Email address used by the canned profiles
    pub const TEST_EMAIL: &str = "jane@example.org";
}
