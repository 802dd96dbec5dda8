use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Cost factor for Argon2id hashing.
///
/// Hashing is the intended bottleneck of the authentication path, so the
/// cost is configuration-provided rather than baked in. Defaults follow the
/// RFC 9106 low-memory recommendation used by the argon2 crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of iterations
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Password hashing implementation (Argon2id).
///
/// Cheap to clone so callers can move it onto blocking worker threads;
/// only the validated cost parameters are held.
#[derive(Clone)]
pub struct Hasher {
    params: Params,
}

impl Hasher {
    /// Create a hasher with the given cost factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Cost parameters are outside Argon2 bounds
    pub fn new(cost: HashCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a freshly generated random salt.
    ///
    /// # Returns
    /// PHC string format hash (algorithm, parameters, salt, and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC string hash.
    ///
    /// The comparison runs at the cost encoded in the stored hash, so old
    /// hashes remain verifiable after a cost change.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("invalid hash: {}", e)))?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cost() -> HashCost {
        // Keep tests fast; production cost comes from configuration.
        HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = Hasher::new(test_cost()).expect("Failed to build hasher");
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash).expect("Failed to verify"));
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Hasher::new(test_cost()).expect("Failed to build hasher");

        let first = hasher.hash("password").unwrap();
        let second = hasher.hash("password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = Hasher::new(test_cost()).expect("Failed to build hasher");

        let result = hasher.verify("password", "not_a_phc_string");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = Hasher::new(HashCost {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        });
        assert!(matches!(result, Err(PasswordError::InvalidCost(_))));
    }
}
