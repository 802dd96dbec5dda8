//! Authentication primitives
//!
//! Infrastructure pieces shared by services that issue or check session
//! tokens:
//! - Password hashing (Argon2id) with a configurable cost factor
//! - JWT signing and verification (HS256) with an enforced minimum
//!   secret length and mandatory expiry
//!
//! Domain knowledge (who the users are, what goes into the claims) stays in
//! the owning service. This crate only provides the cryptographic plumbing.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Hasher, HashCost};
//!
//! let hasher = Hasher::new(HashCost::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Signing
//! ```
//! use auth::Signer;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Claims { sub: String, exp: i64 }
//!
//! let signer = Signer::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = Claims { sub: "user@example.com".into(), exp: i64::MAX };
//! let token = signer.sign(&claims).unwrap();
//! let decoded: Claims = signer.verify(&token).unwrap();
//! ```

pub mod jwt;
pub mod password;

pub use jwt::Signer;
pub use jwt::TokenError;
pub use password::HashCost;
pub use password::Hasher;
pub use password::PasswordError;
