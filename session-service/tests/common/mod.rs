use std::sync::Arc;
use std::time::Duration as StdDuration;

use auth::HashCost;
use auth::Hasher;
use auth::Signer;
use chrono::Duration;
use chrono::Utc;
use session_service::inbound::http::router::create_router;
use session_service::outbound::repositories::InMemoryCredentialStore;
use session_service::outbound::repositories::InMemoryProfileStore;
use session_service::session::models::Credential;
use session_service::session::models::EmailAddress;
use session_service::session::models::Profile;
use session_service::session::models::ProfileId;
use session_service::session::models::Role;
use session_service::session::service::IssuerSettings;
use session_service::session::service::SessionService;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Low Argon2 cost so the suite stays fast; production cost comes from
/// configuration.
fn test_hash_cost() -> HashCost {
    HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

/// Test application backed by in-memory stores, seeded with a known cast:
///
/// * `alice@example.com` / `pass_word!` - student "Alice Zhang"
/// * `bob@example.com` / `prof_word!` - professor "Bob Moreau"
/// * `carol@example.com` / `pass_word!` - credential but no profile
/// * `dave@example.com` / `pass_word!` - duplicate credential records
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Signer sharing the app secret, for crafting tokens in tests
    pub signer: Signer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let hasher = Hasher::new(test_hash_cost()).expect("Failed to build hasher");

        let credentials = Arc::new(InMemoryCredentialStore::new());
        let profiles = Arc::new(InMemoryProfileStore::new());

        seed_identity(&credentials, &hasher, "alice@example.com", "pass_word!").await;
        seed_profile(&profiles, Role::Student, "alice@example.com", "Alice Zhang").await;

        seed_identity(&credentials, &hasher, "bob@example.com", "prof_word!").await;
        seed_profile(&profiles, Role::Professor, "bob@example.com", "Bob Moreau").await;

        // Credential without any role profile.
        seed_identity(&credentials, &hasher, "carol@example.com", "pass_word!").await;

        // Integrity fault: two credential records for the same email.
        seed_identity(&credentials, &hasher, "dave@example.com", "pass_word!").await;
        seed_identity(&credentials, &hasher, "dave@example.com", "pass_word!").await;
        seed_profile(&profiles, Role::Student, "dave@example.com", "Dave Okafor").await;

        let session_service = Arc::new(
            SessionService::new(
                credentials,
                profiles,
                IssuerSettings {
                    signing_secret: String::from_utf8(TEST_SECRET.to_vec()).unwrap(),
                    token_ttl: Duration::minutes(30),
                    store_timeout: StdDuration::from_secs(5),
                    hash_cost: test_hash_cost(),
                },
            )
            .expect("Failed to build session service"),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(session_service);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            signer: Signer::new(TEST_SECRET).expect("Failed to build signer"),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Log in and return the issued token.
    pub async fn login(&self, email: &str, password: &str, role: &str) -> String {
        let response = self
            .post("/api/session")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert!(response.status().is_success(), "login failed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"].as_str().unwrap().to_string()
    }
}

async fn seed_identity(
    store: &InMemoryCredentialStore,
    hasher: &Hasher,
    email: &str,
    password: &str,
) {
    store
        .insert(Credential {
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: hasher.hash(password).unwrap(),
            created_at: Utc::now(),
        })
        .await;
}

async fn seed_profile(store: &InMemoryProfileStore, role: Role, email: &str, name: &str) {
    store
        .insert(
            role,
            Profile {
                id: ProfileId::new(),
                name: name.to_string(),
                email: EmailAddress::new(email.to_string()).unwrap(),
            },
        )
        .await;
}
