//! Rollcall SSO client
//!
//! Wraps the provider's OAuth2 authorization-code flow: authorize-URL
//! construction, the code-for-token exchange, and the identity and profile
//! fetches. The client holds only immutable configuration, so one instance
//! can serve any number of concurrent login attempts.

use crate::config::RollcallConfig;
use crate::errors::SsoError;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::models::{IdentityDescriptor, IdentityEnvelope, Profile, ProfileEnvelope};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the provider's SSO flow
///
/// Generic over the transport so the flow can be driven against a fake in
/// tests; production code uses the `reqwest`-backed default.
pub struct RollcallClient<H = ReqwestHttpClient> {
    config: RollcallConfig,
    http: H,
    /// Prebuilt `Basic` authorization for the token endpoint
    basic: String,
    /// Versioned API base, e.g. `https://api.rollcall.app/v2.1`
    api: String,
    /// Prebuilt "Log in with Rollcall" target
    button_uri: String,
}

impl RollcallClient<ReqwestHttpClient> {
    /// Create a client with the default `reqwest` transport
    #[must_use]
    pub fn new(config: RollcallConfig) -> Self {
        Self::with_http_client(config, ReqwestHttpClient::new())
    }
}

impl<H: HttpClient> RollcallClient<H> {
    /// Create a client over a custom transport
    #[must_use]
    pub fn with_http_client(config: RollcallConfig, http: H) -> Self {
        let basic = config.basic_authorization();
        let api = config.api_url();

        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("client_id", &config.client_id)
            .finish();
        let button_uri = format!("{}?{query}", config.authorize_url);

        Self {
            config,
            http,
            basic,
            api,
            button_uri,
        }
    }

    /// The configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &RollcallConfig {
        &self.config
    }

    /// URL to redirect to when the user presses "Log in with Rollcall"
    #[must_use]
    pub fn login_button_uri(&self) -> &str {
        &self.button_uri
    }

    /// Exchange the `code` query parameter from a redirect for an access token
    ///
    /// Issues exactly one POST to the token endpoint. The provider invalidates
    /// a code on first use, so exchanging the same code twice is expected to
    /// fail on the second attempt.
    ///
    /// # Errors
    ///
    /// Returns [`SsoError::UpstreamAuth`] if the provider rejects the code or
    /// the request fails.
    pub async fn exchange_code(&self, code: &str) -> Result<String, SsoError> {
        let body = json!({
            "code": code,
            "grant_type": "authorization_code",
            "redirect_uri": self.config.redirect_uri,
        });

        let response = self
            .http
            .post_json(&self.config.token_url, &self.basic, &body)
            .await
            .map_err(|e| SsoError::UpstreamAuth(e.to_string()))?;

        let token: TokenResponse = serde_json::from_value(response)
            .map_err(|e| SsoError::UpstreamAuth(format!("Malformed token response: {e}")))?;

        log::debug!("Access token acquired for authorization code exchange");
        Ok(token.access_token)
    }

    /// Fetch the authenticated principal behind `token`
    ///
    /// # Errors
    ///
    /// Returns [`SsoError::UpstreamProfile`] if the request fails or the
    /// response cannot be interpreted.
    pub async fn fetch_identity(&self, token: &str) -> Result<IdentityDescriptor, SsoError> {
        let url = format!("{}/me", self.api);
        let response = self
            .http
            .get_json(&url, &format!("Bearer {token}"))
            .await
            .map_err(|e| SsoError::UpstreamProfile(e.to_string()))?;

        let envelope: IdentityEnvelope = serde_json::from_value(response)
            .map_err(|e| SsoError::UpstreamProfile(format!("Malformed identity response: {e}")))?;

        let descriptor = envelope.into_descriptor();
        log::debug!(
            "Identity fetched: {} {} (district {})",
            descriptor.kind,
            descriptor.id,
            descriptor.district
        );
        Ok(descriptor)
    }

    /// Fetch the full profile for a previously fetched identity
    ///
    /// Accepts both the flat and the `data`-wrapped response shape the
    /// provider has used across API versions.
    ///
    /// # Errors
    ///
    /// Returns [`SsoError::UpstreamProfile`] if the request fails or the
    /// response cannot be interpreted.
    pub async fn fetch_profile(
        &self,
        descriptor: &IdentityDescriptor,
        token: &str,
    ) -> Result<Profile, SsoError> {
        let url = format!("{}/{}s/{}", self.api, descriptor.kind, descriptor.id);
        let response = self
            .http
            .get_json(&url, &format!("Bearer {token}"))
            .await
            .map_err(|e| SsoError::UpstreamProfile(e.to_string()))?;

        let envelope: ProfileEnvelope = serde_json::from_value(response)
            .map_err(|e| SsoError::UpstreamProfile(format!("Malformed profile response: {e}")))?;

        Ok(envelope.into_profile())
    }
}
