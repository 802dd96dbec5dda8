use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for credential and profile store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Transient infrastructure fault. Retryable by the caller; this
    /// service never retries internally.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// More than one record matched a key that must be unique. A
    /// data-integrity fault, never resolved by picking the first row.
    #[error("Multiple records found for email: {email}")]
    DuplicateRecords { email: String },

    /// A stored record failed domain validation on read.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Top-level error for authentication operations.
///
/// Only the `InvalidCredentials` variant is ever distinguishable by an
/// unauthenticated caller; the inbound layer collapses everything else to a
/// generic failure.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Intentionally not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credential verified but no role profile exists. An internal
    /// consistency fault, distinct from a bad password.
    #[error("No {role} profile for authenticated identity")]
    ProfileMissing { role: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),
}
