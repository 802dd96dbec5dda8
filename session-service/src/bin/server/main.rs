use std::sync::Arc;
use std::time::Duration;

use auth::HashCost;
use session_service::config::Config;
use session_service::inbound::http::router::create_router;
use session_service::outbound::repositories::PostgresCredentialStore;
use session_service::outbound::repositories::PostgresProfileStore;
use session_service::session::service::IssuerSettings;
use session_service::session::service::SessionService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "session-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.auth.token_ttl_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let profile_store = Arc::new(PostgresProfileStore::new(pg_pool));

    // Misconfiguration (weak secret, bad hash cost) fails here, at startup.
    let session_service = Arc::new(SessionService::new(
        credential_store,
        profile_store,
        IssuerSettings {
            signing_secret: config.auth.signing_secret.clone(),
            token_ttl: chrono::Duration::minutes(config.auth.token_ttl_minutes),
            store_timeout: Duration::from_millis(config.auth.store_timeout_ms),
            hash_cost: HashCost {
                memory_kib: config.auth.hash.memory_kib,
                iterations: config.auth.hash.iterations,
                parallelism: config.auth.hash.parallelism,
            },
        },
    )?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(session_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
