use async_trait::async_trait;

use crate::session::errors::AuthError;
use crate::session::errors::StoreError;
use crate::session::models::Credential;
use crate::session::models::EmailAddress;
use crate::session::models::IssuedSession;
use crate::session::models::Profile;
use crate::session::models::Role;
use crate::session::models::SessionClaims;

/// Port for session authentication and claims issuance.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Authenticate a credential pair and issue a signed session token for
    /// the requested role.
    ///
    /// # Arguments
    /// * `email` - Identity key to look up
    /// * `password` - Plaintext password to verify
    /// * `role` - Profile space to resolve claims from
    ///
    /// # Returns
    /// Signed token plus the claims it encodes
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or password mismatch
    /// * `ProfileMissing` - Credential valid but no profile for the role
    /// * `Store` - Store fault or duplicate records
    /// * `Token` - Signing failed
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &str,
        role: Role,
    ) -> Result<IssuedSession, AuthError>;

    /// Verify a previously issued token and return its claims.
    ///
    /// # Errors
    /// * `Token` - Invalid signature, malformed token, or expired
    async fn verify_session(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Read-only lookup of stored credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve the credential record for an email.
    ///
    /// The underlying store does not enforce uniqueness, so implementations
    /// must check it: zero matches is `Ok(None)`, more than one is
    /// `DuplicateRecords`.
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    /// * `DuplicateRecords` - More than one record matched
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, StoreError>;
}

/// Read-only lookup of role-specific profile records.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Retrieve the profile for an email within a role's profile space.
    ///
    /// Same uniqueness contract as [`CredentialStore::find_by_email`].
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    /// * `DuplicateRecords` - More than one record matched
    async fn find_by_email(
        &self,
        email: &EmailAddress,
        role: Role,
    ) -> Result<Option<Profile>, StoreError>;
}
