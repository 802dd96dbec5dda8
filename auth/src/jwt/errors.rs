use thiserror::Error;

/// Error type for token signing and verification.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Signing secret too short: need at least {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
