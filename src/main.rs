use anyhow::{Context, Result};
use campus_market::application::{
    ports::{security::IdentityVerifier, time::Clock},
    services::ApplicationServices,
};
use campus_market::config::{AppConfig, StorageBackend};
use campus_market::domain::listing::ListingRepository;
use campus_market::infrastructure::{
    database,
    repositories::{InMemoryListingRepository, PostgresListingRepository},
    security::token::BiscuitIdentityVerifier,
    time::SystemClock,
};
use campus_market::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let listing_repo = build_listing_repository(&config).await?;

    let identity_verifier: Arc<dyn IdentityVerifier> = Arc::new(
        BiscuitIdentityVerifier::from_public_key_hex(config.identity_public_key())?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        listing_repo,
        identity_verifier,
        clock,
        config.identity_policy(),
    ));

    let app = build_router(HttpState::new(services), &config.router_options());
    let service = app.into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr()))?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_listing_repository(config: &AppConfig) -> Result<Arc<dyn ListingRepository>> {
    match config.storage_backend() {
        StorageBackend::Postgres => {
            let url = config
                .database_url()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = database::init_pool(url, config.database_max_connections()).await?;
            database::run_migrations(&pool).await?;
            tracing::info!(
                max_connections = config.database_max_connections(),
                "connected to postgres"
            );
            Ok(Arc::new(PostgresListingRepository::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory listing store; data is lost on restart");
            Ok(Arc::new(InMemoryListingRepository::new()))
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
