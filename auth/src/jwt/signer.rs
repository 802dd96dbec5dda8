use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::TokenError;

/// Minimum signing secret length in bytes (256 bits for HS256).
const MIN_SECRET_LEN: usize = 32;

/// Signs and verifies JWT tokens (HS256).
///
/// Generic over the claims type so the owning service defines the payload
/// schema. Verification requires an `exp` claim and applies zero leeway:
/// an expired token is rejected the second its expiry passes.
pub struct Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl Signer {
    /// Create a signer from a process-wide secret.
    ///
    /// The secret comes from configuration, never from source or from
    /// request input. A too-short secret is a startup-class
    /// misconfiguration and is rejected here rather than per request.
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::WeakSecret {
                min: MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Sign claims into a JWT token string.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims serialization or signing failed
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning the decoded claims.
    ///
    /// # Errors
    /// * `Expired` - The `exp` claim is in the past
    /// * `Invalid` - Bad signature, malformed token, or missing `exp`
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<T>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}
