use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::session::errors::EmailError;
use crate::session::errors::RoleError;

/// Email address value type.
///
/// Validates format using an RFC 5322 compliant parser. Stored and compared
/// case-sensitively, exactly as the store holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role tag attached to issued claims.
///
/// Each role has its own profile space; an identity may hold a profile in
/// more than one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Professor,
}

impl Role {
    /// Get the role name as used in claims and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "professor" => Ok(Role::Professor),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored credential record.
///
/// Owned by the credential store; this service only ever reads it. The
/// password hash never leaves the domain layer.
#[derive(Debug, Clone)]
pub struct Credential {
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Profile unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    /// Generate a new random profile ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role-specific profile record resolved after a successful password check.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub email: EmailAddress,
}

/// Claims carried by an issued session token.
///
/// Fixed, explicit schema: the fields here are the complete allow-list of
/// what a token may disclose. Built fresh per authentication request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the authenticated email
    pub sub: String,
    /// Role the session was authenticated for
    pub role: Role,
    /// Display name from the role profile
    pub name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Compose claims from a resolved profile.
    ///
    /// Copies only the allow-listed profile fields; the credential record
    /// (and in particular the password hash) is never consulted here.
    pub fn from_profile(profile: &Profile, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: profile.email.as_str().to_string(),
            role,
            name: profile.name.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Result of a successful authentication: the signed token and the claims
/// it encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedSession {
    pub access_token: String,
    pub claims: SessionClaims,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_valid() {
        let email = EmailAddress::new("alice@example.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_email_address_invalid() {
        let result = EmailAddress::new("not-an-email".to_string());
        assert!(matches!(result, Err(EmailError::InvalidFormat(_))));
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("professor".parse::<Role>().unwrap(), Role::Professor);
        assert_eq!(Role::Student.to_string(), "student");
    }

    #[test]
    fn test_role_unknown() {
        let result = "admin".parse::<Role>();
        assert!(matches!(result, Err(RoleError::Unknown(_))));
    }

    #[test]
    fn test_claims_from_profile() {
        let profile = Profile {
            id: ProfileId::new(),
            name: "Alice".to_string(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
        };

        let claims = SessionClaims::from_profile(&profile, Role::Student, Duration::minutes(30));

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_claims_serialize_role_lowercase() {
        let profile = Profile {
            id: ProfileId::new(),
            name: "Bob".to_string(),
            email: EmailAddress::new("bob@example.com".to_string()).unwrap(),
        };

        let claims = SessionClaims::from_profile(&profile, Role::Professor, Duration::minutes(5));
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "professor");
    }
}
