use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
use kiosk_gateway::config::Config;
use kiosk_gateway::domain::authentication::service::AuthService;
use kiosk_gateway::inbound::http::router::create_router;
use kiosk_gateway::outbound::health::PostgresReadinessProbe;
use kiosk_gateway::outbound::repositories::PostgresRefreshTokenRepository;
use kiosk_gateway::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tokio::sync::Notify;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiosk_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "kiosk-gateway",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let downstream = config.downstream_targets()?;

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        private_key_path = %config.keys.private_key_path,
        public_key_path = %config.keys.public_key_path,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let signer = Arc::new(JwtHandler::from_rsa_pem_files(
        &config.keys.private_key_path,
        &config.keys.public_key_path,
    )?);
    tracing::info!(algorithm = "RS256", "Signing keys loaded");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool.clone()));
    let readiness = Arc::new(PostgresReadinessProbe::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        refresh_token_repository,
        signer,
    ));

    let application = create_router(auth_service, readiness, downstream);

    let address = config.server_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, protocol = "http", "Http server listening");

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, application)
        .with_graceful_shutdown({
            let shutdown = Arc::clone(&shutdown);
            async move {
                shutdown_signal().await;
                shutdown.notify_one();
            }
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        _ = async {
            shutdown.notified().await;
            tokio::time::sleep(SHUTDOWN_GRACE_PERIOD).await;
        } => {
            tracing::warn!(
                grace_period_secs = SHUTDOWN_GRACE_PERIOD.as_secs(),
                "In-flight requests did not drain in time, forcing shutdown"
            );
        }
    }

    tracing::info!("Server exited");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
