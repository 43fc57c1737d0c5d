//! Data model for the SSO flow
//!
//! Wire envelopes are normalized at the deserialization boundary: the provider
//! moved profile fields in and out of a `data` wrapper between API versions,
//! so both shapes are accepted and collapsed into one canonical [`Profile`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of principal the provider authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Teacher,
    Student,
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserKind::Teacher => write!(f, "teacher"),
            UserKind::Student => write!(f, "student"),
        }
    }
}

/// The authenticated principal, as reported by the `/me` endpoint
///
/// `id` is the stable cross-session key; it is what a caller's user store is
/// expected to have recorded when an account was previously linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDescriptor {
    pub id: String,
    pub district: String,
    pub kind: UserKind,
    pub authorized_by: String,
}

/// Structured name as the provider reports it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileName {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
    pub middle: Option<String>,
}

/// Full user profile, fetched only when no linked account was found by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub name: ProfileName,
    pub district: Option<String>,
}

/// Result of reconciling a provider identity against the caller's user store
///
/// `U` is whatever record type the injected [`UserStore`](crate::reconcile::UserStore)
/// resolves to; the SDK never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "UPPERCASE")]
pub enum ReconciliationOutcome<U> {
    /// A linked account already exists for this provider id
    Success { user: U, provider_id: String },

    /// An unlinked account matched by email; offer account linking
    Merge { user: U, provider_id: String },

    /// No account found; offer account creation or manual linking
    New {
        profile: Profile,
        provider_id: String,
        kind: UserKind,
    },
}

impl<U> ReconciliationOutcome<U> {
    /// The provider id this outcome was decided for
    #[must_use]
    pub fn provider_id(&self) -> &str {
        match self {
            ReconciliationOutcome::Success { provider_id, .. }
            | ReconciliationOutcome::Merge { provider_id, .. }
            | ReconciliationOutcome::New { provider_id, .. } => provider_id,
        }
    }
}

// --- Wire shapes -----------------------------------------------------------

/// `/me` response: `{type, data: {id, district, type, authorized_by}, links}`
#[derive(Debug, Deserialize)]
pub(crate) struct IdentityEnvelope {
    #[serde(rename = "type")]
    kind: UserKind,
    data: IdentityData,
}

#[derive(Debug, Deserialize)]
struct IdentityData {
    id: String,
    district: String,
    #[serde(rename = "type")]
    kind: Option<UserKind>,
    authorized_by: String,
}

impl IdentityEnvelope {
    /// Collapse the envelope, preferring the inner `type` when both are present
    pub(crate) fn into_descriptor(self) -> IdentityDescriptor {
        IdentityDescriptor {
            id: self.data.id,
            district: self.data.district,
            kind: self.data.kind.unwrap_or(self.kind),
            authorized_by: self.data.authorized_by,
        }
    }
}

/// Profile response in either provider API shape: nested `{data: {...}}` or flat
///
/// Nested is tried first; its `data` key makes the match unambiguous.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProfileEnvelope {
    Nested { data: Profile },
    Flat(Profile),
}

impl ProfileEnvelope {
    pub(crate) fn into_profile(self) -> Profile {
        match self {
            ProfileEnvelope::Nested { data } | ProfileEnvelope::Flat(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_envelope_collapses_to_descriptor() {
        let json = serde_json::json!({
            "type": "teacher",
            "data": {
                "id": "T1",
                "district": "D1",
                "type": "teacher",
                "authorized_by": "district"
            },
            "links": [{"rel": "self", "uri": "/me"}]
        });

        let envelope: IdentityEnvelope = serde_json::from_value(json).unwrap();
        let descriptor = envelope.into_descriptor();
        assert_eq!(descriptor.id, "T1");
        assert_eq!(descriptor.district, "D1");
        assert_eq!(descriptor.kind, UserKind::Teacher);
        assert_eq!(descriptor.authorized_by, "district");
    }

    #[test]
    fn identity_envelope_falls_back_to_outer_type() {
        let json = serde_json::json!({
            "type": "student",
            "data": {
                "id": "S9",
                "district": "D2",
                "authorized_by": "district"
            }
        });

        let descriptor: IdentityDescriptor = serde_json::from_value::<IdentityEnvelope>(json)
            .unwrap()
            .into_descriptor();
        assert_eq!(descriptor.kind, UserKind::Student);
    }

    #[test]
    fn flat_and_nested_profiles_normalize_identically() {
        let flat = serde_json::json!({
            "id": "T1",
            "email": "jane@example.org",
            "name": {"first": "Jane", "last": "Doe"},
            "district": "D1"
        });
        let nested = serde_json::json!({
            "data": {
                "id": "T1",
                "email": "jane@example.org",
                "name": {"first": "Jane", "last": "Doe"},
                "district": "D1"
            },
            "links": []
        });

        let from_flat = serde_json::from_value::<ProfileEnvelope>(flat)
            .unwrap()
            .into_profile();
        let from_nested = serde_json::from_value::<ProfileEnvelope>(nested)
            .unwrap()
            .into_profile();
        assert_eq!(from_flat, from_nested);
        assert_eq!(from_flat.email.as_deref(), Some("jane@example.org"));
        assert_eq!(from_flat.name.first, "Jane");
        assert_eq!(from_flat.name.middle, None);
    }

    #[test]
    fn profile_without_name_or_email_still_parses() {
        let json = serde_json::json!({"id": "S2"});
        let profile = serde_json::from_value::<ProfileEnvelope>(json)
            .unwrap()
            .into_profile();
        assert_eq!(profile.id, "S2");
        assert_eq!(profile.email, None);
        assert_eq!(profile.name, ProfileName::default());
    }

    #[test]
    fn user_kind_renders_as_path_fragment() {
        assert_eq!(UserKind::Teacher.to_string(), "teacher");
        assert_eq!(UserKind::Student.to_string(), "student");
    }

    #[test]
    fn outcome_serializes_with_uppercase_status_tag() {
        let outcome: ReconciliationOutcome<serde_json::Value> = ReconciliationOutcome::Merge {
            user: serde_json::json!({"id": 42}),
            provider_id: "T1".to_string(),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "MERGE");
        assert_eq!(value["provider_id"], "T1");
    }
}
