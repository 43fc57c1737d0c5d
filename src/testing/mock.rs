//! Mock objects and fake implementations for testing
//!
//! [`MockHttpClient`] scripts the three provider endpoints and records every
//! request it serves; [`MemoryUserStore`] is an in-memory [`UserStore`] that
//! records which lookups were invoked. Both share state through `Arc` clones,
//! so a test can keep a handle after moving the mock into a client.

use crate::http::{HttpClient, HttpError};
use crate::reconcile::UserStore;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request served by [`MockHttpClient`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub authorization: String,
    /// JSON body for POSTs, `None` for GETs
    pub body: Option<Value>,
}

type Scripted = Result<Value, (u16, String)>;

#[derive(Default)]
struct MockHttpState {
    requests: Mutex<Vec<RecordedRequest>>,
    token: Mutex<Option<Scripted>>,
    identity: Mutex<Option<Scripted>>,
    profile: Mutex<Option<Scripted>>,
}

/// Scripted transport standing in for the provider API
///
/// Routing is positional: POSTs hit the token script, GETs ending in `/me`
/// hit the identity script, any other GET hits the profile script. An
/// unscripted endpoint answers 404 so an unexpected call fails the test
/// loudly instead of hanging it.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<MockHttpState>,
}

impl MockHttpClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the token endpoint to return `{"access_token": token}`
    #[must_use]
    pub fn with_token_response(self, token: &str) -> Self {
        *self.state.token.lock().unwrap() = Some(Ok(serde_json::json!({ "access_token": token })));
        self
    }

    /// Script the token endpoint to return an arbitrary JSON body
    #[must_use]
    pub fn with_token_json(self, body: Value) -> Self {
        *self.state.token.lock().unwrap() = Some(Ok(body));
        self
    }

    /// Script the token endpoint to fail with `status` and `body`
    #[must_use]
    pub fn with_token_error(self, status: u16, body: &str) -> Self {
        *self.state.token.lock().unwrap() = Some(Err((status, body.to_string())));
        self
    }

    /// Script the `/me` endpoint
    #[must_use]
    pub fn with_identity_response(self, body: Value) -> Self {
        *self.state.identity.lock().unwrap() = Some(Ok(body));
        self
    }

    /// Script the `/me` endpoint to fail with `status` and `body`
    #[must_use]
    pub fn with_identity_error(self, status: u16, body: &str) -> Self {
        *self.state.identity.lock().unwrap() = Some(Err((status, body.to_string())));
        self
    }

    /// Script the profile endpoint
    #[must_use]
    pub fn with_profile_response(self, body: Value) -> Self {
        *self.state.profile.lock().unwrap() = Some(Ok(body));
        self
    }

    /// Script the profile endpoint to fail with `status` and `body`
    #[must_use]
    pub fn with_profile_error(self, status: u16, body: &str) -> Self {
        *self.state.profile.lock().unwrap() = Some(Err((status, body.to_string())));
        self
    }

    /// Every request served so far, in order
    #[must_use]
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Number of GETs to the identity endpoint
    #[must_use]
    pub fn identity_request_count(&self) -> usize {
        self.recorded_requests()
            .iter()
            .filter(|r| r.method == "GET" && r.url.ends_with("/me"))
            .count()
    }

    /// Number of GETs to the profile endpoint
    #[must_use]
    pub fn profile_request_count(&self) -> usize {
        self.recorded_requests()
            .iter()
            .filter(|r| r.method == "GET" && !r.url.ends_with("/me"))
            .count()
    }

    fn record(&self, method: &str, url: &str, authorization: &str, body: Option<Value>) {
        self.state.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            authorization: authorization.to_string(),
            body,
        });
    }

    fn respond(script: &Mutex<Option<Scripted>>) -> Result<Value, HttpError> {
        match script.lock().unwrap().clone() {
            Some(Ok(body)) => Ok(body),
            Some(Err((status, body))) => Err(HttpError::Status { status, body }),
            None => Err(HttpError::Status {
                status: 404,
                body: "no scripted response".to_string(),
            }),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_json(
        &self,
        url: &str,
        authorization: &str,
        body: &Value,
    ) -> Result<Value, HttpError> {
        self.record("POST", url, authorization, Some(body.clone()));
        Self::respond(&self.state.token)
    }

    async fn get_json(&self, url: &str, authorization: &str) -> Result<Value, HttpError> {
        self.record("GET", url, authorization, None);
        if url.ends_with("/me") {
            Self::respond(&self.state.identity)
        } else {
            Self::respond(&self.state.profile)
        }
    }
}

#[derive(Default)]
struct MemoryStoreState {
    by_provider_id: Mutex<HashMap<String, Value>>,
    by_email: Mutex<HashMap<String, Value>>,
    provider_id_lookups: Mutex<Vec<String>>,
    email_lookups: Mutex<Vec<String>>,
    failure: Mutex<Option<String>>,
}

/// In-memory [`UserStore`] that records every lookup it serves
///
/// User records are arbitrary JSON values; the reconciliation flow treats
/// them as opaque. `with_failure` turns every lookup into an error, for
/// exercising store-error propagation.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    state: Arc<MemoryStoreState>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user linked to `provider_id`
    #[must_use]
    pub fn with_linked_user(self, provider_id: &str, user: Value) -> Self {
        self.state
            .by_provider_id
            .lock()
            .unwrap()
            .insert(provider_id.to_string(), user);
        self
    }

    /// Seed an unlinked user reachable by `email`
    #[must_use]
    pub fn with_unlinked_user(self, email: &str, user: Value) -> Self {
        self.state
            .by_email
            .lock()
            .unwrap()
            .insert(email.to_string(), user);
        self
    }

    /// Make every lookup fail with `message`
    #[must_use]
    pub fn with_failure(self, message: &str) -> Self {
        *self.state.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Provider ids passed to `find_by_provider_id`, in order
    #[must_use]
    pub fn provider_id_lookups(&self) -> Vec<String> {
        self.state.provider_id_lookups.lock().unwrap().clone()
    }

    /// Emails passed to `find_by_email`, in order
    #[must_use]
    pub fn email_lookups(&self) -> Vec<String> {
        self.state.email_lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    type User = Value;
    type Error = String;

    async fn find_by_provider_id(
        &self,
        provider_id: &str,
    ) -> Result<Option<Self::User>, Self::Error> {
        self.state
            .provider_id_lookups
            .lock()
            .unwrap()
            .push(provider_id.to_string());
        if let Some(message) = self.state.failure.lock().unwrap().clone() {
            return Err(message);
        }
        Ok(self
            .state
            .by_provider_id
            .lock()
            .unwrap()
            .get(provider_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Self::User>, Self::Error> {
        self.state
            .email_lookups
            .lock()
            .unwrap()
            .push(email.to_string());
        if let Some(message) = self.state.failure.lock().unwrap().clone() {
            return Err(message);
        }
        Ok(self.state.by_email.lock().unwrap().get(email).cloned())
    }
}
