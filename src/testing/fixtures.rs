//! Test fixtures providing pre-built test objects
//!
//! Canned configurations and provider JSON payloads shared across unit and
//! integration tests, so the same wire shapes are not restated in every test.

use crate::config::RollcallConfig;
use serde_json::{json, Value};

use super::constants::{
    TEST_CLIENT_ID, TEST_CLIENT_SECRET, TEST_EMAIL, TEST_PROVIDER_ID, TEST_REDIRECT_URI,
};

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    /// Standard client configuration with test credentials
    #[must_use]
    pub fn config() -> RollcallConfig {
        RollcallConfig::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET, TEST_REDIRECT_URI)
    }

    /// `/me` response for a teacher principal
    #[must_use]
    pub fn teacher_identity_json() -> Value {
        json!({
            "type": "teacher",
            "data": {
                "id": TEST_PROVIDER_ID,
                "district": "D1",
                "type": "teacher",
                "authorized_by": "district"
            },
            "links": [{"rel": "self", "uri": "/me"}]
        })
    }

    /// `/me` response for a student principal
    #[must_use]
    pub fn student_identity_json() -> Value {
        json!({
            "type": "student",
            "data": {
                "id": "S7",
                "district": "D1",
                "type": "student",
                "authorized_by": "district"
            },
            "links": [{"rel": "self", "uri": "/me"}]
        })
    }

    /// Profile in the flat response shape, with an email
    #[must_use]
    pub fn flat_profile_json() -> Value {
        json!({
            "id": TEST_PROVIDER_ID,
            "email": TEST_EMAIL,
            "name": {"first": "Jane", "last": "Doe"},
            "district": "D1"
        })
    }

    /// Profile in the `data`-wrapped response shape, with an email
    #[must_use]
    pub fn nested_profile_json() -> Value {
        json!({
            "data": {
                "id": TEST_PROVIDER_ID,
                "email": TEST_EMAIL,
                "name": {"first": "Jane", "last": "Doe"},
                "district": "D1"
            },
            "links": [{"rel": "self", "uri": format!("/teachers/{TEST_PROVIDER_ID}")}]
        })
    }

    /// Profile without an email address
    #[must_use]
    pub fn profile_without_email_json() -> Value {
        json!({
            "id": "S7",
            "name": {"first": "Sam", "last": "Pupil"},
            "district": "D1"
        })
    }

    /// A caller-side user record, opaque to the SDK
    #[must_use]
    pub fn local_user(id: u64, name: &str) -> Value {
        json!({"id": id, "name": name})
    }
}
