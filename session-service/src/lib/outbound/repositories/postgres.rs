use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::session::errors::StoreError;
use crate::session::models::Credential;
use crate::session::models::EmailAddress;
use crate::session::models::Profile;
use crate::session::models::ProfileId;
use crate::session::models::Role;
use crate::session::ports::CredentialStore;
use crate::session::ports::ProfileStore;

/// Collapse a multi-row result into the at-most-one contract the ports
/// require. Picking the first row silently is exactly the bug this guards
/// against.
fn expect_at_most_one<T>(mut rows: Vec<T>, email: &EmailAddress) -> Result<Option<T>, StoreError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(Some(rows.remove(0))),
        _ => Err(StoreError::DuplicateRecords {
            email: email.as_str().to_string(),
        }),
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> Result<Credential, StoreError> {
        Ok(Credential {
            email: EmailAddress::new(self.email)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, StoreError> {
        let rows = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT email, password_hash, created_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        expect_at_most_one(rows, email)?
            .map(CredentialRow::into_credential)
            .transpose()
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    email: String,
}

impl ProfileRow {
    fn into_profile(self) -> Result<Profile, StoreError> {
        Ok(Profile {
            id: ProfileId(self.id),
            name: self.name,
            email: EmailAddress::new(self.email)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?,
        })
    }
}

pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
        role: Role,
    ) -> Result<Option<Profile>, StoreError> {
        // One table per profile space, as provisioned by the migrations.
        let sql = match role {
            Role::Student => {
                r#"
                SELECT id, name, email
                FROM students
                WHERE email = $1
                "#
            }
            Role::Professor => {
                r#"
                SELECT id, name, email
                FROM professors
                WHERE email = $1
                "#
            }
        };

        let rows = sqlx::query_as::<_, ProfileRow>(sql)
            .bind(email.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        expect_at_most_one(rows, email)?
            .map(ProfileRow::into_profile)
            .transpose()
    }
}
