//! Error types for the Rollcall SSO flow
//!
//! Two layers: [`SsoError`] covers the provider-facing calls, and
//! [`ReconcileError`] adds a pass-through variant for errors raised by the
//! caller's user store during reconciliation.

use std::fmt;

/// Errors surfaced by the provider-facing OAuth calls
///
/// Every failure is fatal to the current login attempt. The SDK performs no
/// retry or backoff; callers decide whether to send the user back through the
/// login flow.
#[derive(Debug)]
pub enum SsoError {
    /// Token exchange failed (rejected code, bad credentials, or transport failure)
    UpstreamAuth(String),

    /// Identity or profile fetch failed after a valid token was obtained
    UpstreamProfile(String),
}

impl fmt::Display for SsoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SsoError::UpstreamAuth(msg) => write!(f, "Token exchange failed: {msg}"),
            SsoError::UpstreamProfile(msg) => write!(f, "Identity fetch failed: {msg}"),
        }
    }
}

impl std::error::Error for SsoError {}

/// Errors surfaced by [`reconcile`](crate::client::RollcallClient::reconcile)
///
/// Store errors are carried verbatim so the caller's persistence-layer error
/// semantics stay visible through the SDK boundary.
#[derive(Debug)]
pub enum ReconcileError<E> {
    /// A provider call failed (see [`SsoError`])
    Sso(SsoError),

    /// The injected user store failed; the inner error is untouched
    Store(E),
}

impl<E> From<SsoError> for ReconcileError<E> {
    fn from(err: SsoError) -> Self {
        ReconcileError::Sso(err)
    }
}

impl<E: fmt::Display> fmt::Display for ReconcileError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::Sso(err) => write!(f, "{err}"),
            ReconcileError::Store(err) => write!(f, "User store error: {err}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ReconcileError<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_carry_the_upstream_message() {
        let err = SsoError::UpstreamAuth("status 400: invalid_grant".to_string());
        assert_eq!(
            err.to_string(),
            "Token exchange failed: status 400: invalid_grant"
        );

        let err = SsoError::UpstreamProfile("connection reset".to_string());
        assert_eq!(err.to_string(), "Identity fetch failed: connection reset");
    }

    #[test]
    fn store_errors_pass_through_unmodified() {
        let err: ReconcileError<String> = ReconcileError::Store("db offline".to_string());
        assert_eq!(err.to_string(), "User store error: db offline");

        match err {
            ReconcileError::Store(inner) => assert_eq!(inner, "db offline"),
            ReconcileError::Sso(_) => panic!("expected a store error"),
        }
    }
}
