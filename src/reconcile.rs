//! Account reconciliation
//!
//! After the provider authenticates a user, the login still has to be matched
//! against the application's own records. [`UserStore`] is the seam to that
//! persistence layer; [`RollcallClient::reconcile`] drives the full flow and
//! classifies the login as an existing, mergeable, or brand-new account.

use crate::client::RollcallClient;
use crate::errors::ReconcileError;
use crate::http::HttpClient;
use crate::models::ReconciliationOutcome;
use async_trait::async_trait;

/// Lookup capabilities the caller's persistence layer must provide
///
/// Absence is reported as `Ok(None)`; an `Err` means the store itself failed
/// and aborts reconciliation with the error passed through untouched.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// The caller's user record type; the SDK never inspects it
    type User: Send;
    /// The caller's error type, surfaced verbatim via [`ReconcileError::Store`]
    type Error: Send;

    /// Look up a user previously linked to this provider id
    async fn find_by_provider_id(
        &self,
        provider_id: &str,
    ) -> Result<Option<Self::User>, Self::Error>;

    /// Look up an unlinked user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Self::User>, Self::Error>;
}

impl<H: HttpClient> RollcallClient<H> {
    /// Run the full login flow for a redirect `code` and classify the result
    ///
    /// The steps are strictly sequential, each feeding the next:
    /// 1. exchange the code for an access token;
    /// 2. fetch the authenticated identity;
    /// 3. look the provider id up in the store; a hit short-circuits to
    ///    [`ReconciliationOutcome::Success`] without fetching the profile;
    /// 4. otherwise fetch the full profile;
    /// 5. if the profile carries an email that matches an existing user,
    ///    return [`ReconciliationOutcome::Merge`];
    /// 6. otherwise return [`ReconciliationOutcome::New`] with the profile.
    ///
    /// Nothing is retried; the first failure aborts the attempt.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::Sso`] if a provider call fails (`UpstreamAuth` for
    /// the token exchange, `UpstreamProfile` for the identity and profile
    /// fetches), [`ReconcileError::Store`] if a store lookup fails.
    pub async fn reconcile<S: UserStore>(
        &self,
        code: &str,
        store: &S,
    ) -> Result<ReconciliationOutcome<S::User>, ReconcileError<S::Error>> {
        let token = self.exchange_code(code).await?;
        let descriptor = self.fetch_identity(&token).await?;

        if let Some(user) = store
            .find_by_provider_id(&descriptor.id)
            .await
            .map_err(ReconcileError::Store)?
        {
            log::debug!("Provider id {} already linked", descriptor.id);
            log::info!("Login reconciled as SUCCESS for provider id {}", descriptor.id);
            return Ok(ReconciliationOutcome::Success {
                user,
                provider_id: descriptor.id,
            });
        }
        log::debug!("Provider id {} not linked, fetching profile", descriptor.id);

        let profile = self.fetch_profile(&descriptor, &token).await?;

        if let Some(email) = &profile.email {
            if let Some(user) = store
                .find_by_email(email)
                .await
                .map_err(ReconcileError::Store)?
            {
                log::info!("Login reconciled as MERGE for provider id {}", descriptor.id);
                return Ok(ReconciliationOutcome::Merge {
                    user,
                    provider_id: descriptor.id,
                });
            }
        }

        log::info!("Login reconciled as NEW for provider id {}", descriptor.id);
        Ok(ReconciliationOutcome::New {
            profile,
            provider_id: descriptor.id,
            kind: descriptor.kind,
        })
    }
}
