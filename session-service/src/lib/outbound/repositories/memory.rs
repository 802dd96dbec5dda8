use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::session::errors::StoreError;
use crate::session::models::Credential;
use crate::session::models::EmailAddress;
use crate::session::models::Profile;
use crate::session::models::Role;
use crate::session::ports::CredentialStore;
use crate::session::ports::ProfileStore;

/// In-memory credential store for tests and local runs without a database.
///
/// Deliberately stores a flat list rather than a map keyed by email:
/// duplicate records are representable, which is what exercises the
/// defensive uniqueness check in the ports contract.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<Vec<Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, credential: Credential) {
        self.records.write().await.push(credential);
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, StoreError> {
        let records = self.records.read().await;
        let mut matches = records.iter().filter(|c| &c.email == email);

        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(StoreError::DuplicateRecords {
                email: email.as_str().to_string(),
            });
        }

        Ok(first)
    }
}

/// In-memory profile store holding both role profile spaces.
#[derive(Default)]
pub struct InMemoryProfileStore {
    students: RwLock<Vec<Profile>>,
    professors: RwLock<Vec<Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, role: Role, profile: Profile) {
        match role {
            Role::Student => self.students.write().await.push(profile),
            Role::Professor => self.professors.write().await.push(profile),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
        role: Role,
    ) -> Result<Option<Profile>, StoreError> {
        let records = match role {
            Role::Student => self.students.read().await,
            Role::Professor => self.professors.read().await,
        };
        let mut matches = records.iter().filter(|p| &p.email == email);

        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(StoreError::DuplicateRecords {
                email: email.as_str().to_string(),
            });
        }

        Ok(first)
    }
}
