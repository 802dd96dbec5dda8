use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use auth::HashCost;
use auth::Hasher;
use auth::PasswordError;
use auth::Signer;
use chrono::Duration;

use crate::session::errors::AuthError;
use crate::session::errors::StoreError;
use crate::session::models::Credential;
use crate::session::models::EmailAddress;
use crate::session::models::IssuedSession;
use crate::session::models::Profile;
use crate::session::models::Role;
use crate::session::models::SessionClaims;
use crate::session::ports::CredentialStore;
use crate::session::ports::ProfileStore;
use crate::session::ports::SessionServicePort;

/// Fixed input for the decoy comparison on unknown emails. The hash is
/// computed once at startup; the plaintext itself grants nothing.
const DECOY_PASSWORD: &str = "decoy-password-for-timing-equalization";

/// Issuer configuration assembled at startup from the loaded config.
#[derive(Debug, Clone)]
pub struct IssuerSettings {
    /// Process-wide signing secret, configuration-provided
    pub signing_secret: String,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Upper bound on each store lookup
    pub store_timeout: StdDuration,
    /// Argon2 cost factor for password verification
    pub hash_cost: HashCost,
}

/// Domain service implementation for authentication and claims issuance.
///
/// Stateless per request: concurrent `authenticate` calls share only the
/// read-only stores, the signing key, and the precomputed decoy hash.
pub struct SessionService<CS, PS>
where
    CS: CredentialStore,
    PS: ProfileStore,
{
    credentials: Arc<CS>,
    profiles: Arc<PS>,
    hasher: Hasher,
    signer: Signer,
    token_ttl: Duration,
    store_timeout: StdDuration,
    decoy_hash: String,
}

impl<CS, PS> SessionService<CS, PS>
where
    CS: CredentialStore,
    PS: ProfileStore,
{
    /// Create a new session service with injected stores.
    ///
    /// Fails fast on misconfiguration (weak secret, out-of-bounds hash
    /// cost) so a broken deployment never reaches per-request errors.
    ///
    /// # Errors
    /// * `Token(WeakSecret)` - Signing secret shorter than 32 bytes
    /// * `Password(InvalidCost)` - Hash cost outside Argon2 bounds
    pub fn new(
        credentials: Arc<CS>,
        profiles: Arc<PS>,
        settings: IssuerSettings,
    ) -> Result<Self, AuthError> {
        let hasher = Hasher::new(settings.hash_cost)?;
        let signer = Signer::new(settings.signing_secret.as_bytes())?;
        let decoy_hash = hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            credentials,
            profiles,
            hasher,
            signer,
            token_ttl: settings.token_ttl,
            store_timeout: settings.store_timeout,
            decoy_hash,
        })
    }

    async fn lookup_credential(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, AuthError> {
        let result = tokio::time::timeout(self.store_timeout, self.credentials.find_by_email(email))
            .await
            .map_err(|_| StoreError::Unavailable("credential lookup timed out".to_string()))?;

        result.map_err(|e| {
            if let StoreError::DuplicateRecords { email } = &e {
                tracing::error!(email = %email, "Credential store integrity fault: duplicate records");
            }
            AuthError::from(e)
        })
    }

    async fn lookup_profile(
        &self,
        email: &EmailAddress,
        role: Role,
    ) -> Result<Option<Profile>, AuthError> {
        let result =
            tokio::time::timeout(self.store_timeout, self.profiles.find_by_email(email, role))
                .await
                .map_err(|_| StoreError::Unavailable("profile lookup timed out".to_string()))?;

        result.map_err(|e| {
            if let StoreError::DuplicateRecords { email } = &e {
                tracing::error!(
                    email = %email,
                    role = %role,
                    "Profile store integrity fault: duplicate records"
                );
            }
            AuthError::from(e)
        })
    }

    /// Run the Argon2 comparison on a blocking worker thread so the
    /// deliberately expensive hash never stalls the async executor.
    async fn verify_password(&self, password: &str, stored_hash: String) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();

        let matched = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| {
                PasswordError::VerificationFailed(format!("verifier task failed: {}", e))
            })??;

        Ok(matched)
    }
}

#[async_trait]
impl<CS, PS> SessionServicePort for SessionService<CS, PS>
where
    CS: CredentialStore,
    PS: ProfileStore,
{
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &str,
        role: Role,
    ) -> Result<IssuedSession, AuthError> {
        let Some(credential) = self.lookup_credential(email).await? else {
            // Unknown email: burn a comparison against the decoy hash so
            // the response timing matches the wrong-password path.
            self.verify_password(password, self.decoy_hash.clone()).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let matched = self
            .verify_password(password, credential.password_hash.clone())
            .await?;
        if !matched {
            return Err(AuthError::InvalidCredentials);
        }

        let profile = self.lookup_profile(email, role).await?.ok_or_else(|| {
            tracing::error!(
                email = %email,
                role = %role,
                "Credential verified but no role profile exists"
            );
            AuthError::ProfileMissing {
                role: role.to_string(),
            }
        })?;

        let claims = SessionClaims::from_profile(&profile, role, self.token_ttl);
        let access_token = self.signer.sign(&claims)?;

        tracing::info!(role = %role, "Session issued");

        Ok(IssuedSession {
            access_token,
            claims,
        })
    }

    async fn verify_session(&self, token: &str) -> Result<SessionClaims, AuthError> {
        Ok(self.signer.verify::<SessionClaims>(token)?)
    }
}
