use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use people_api::{build_router, ApiContext};
use people_core::repositories::SessionStore;
use people_core::services::{OAuthService, PeopleService};
use people_infrastructure::{FileSessionStore, ZohoHttpClient};
use people_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    if let Err(e) = people_shared::telemetry::init_telemetry() {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!("People server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Session store: load the snapshot once at startup
    let store = Arc::new(FileSessionStore::new(&config.store.path));
    let loaded = store.load().await;
    info!("Loaded {} sessions from {}", loaded, config.store.path);

    // Upstream client and services
    let zoho = Arc::new(ZohoHttpClient::new(&config.zoho));
    let oauth = Arc::new(OAuthService::new(
        store.clone(),
        zoho.clone(),
        config.zoho.default_api_domain.clone(),
    ));
    let people = Arc::new(PeopleService::new(store.clone(), zoho));

    // Build router
    let app = build_router(
        oauth,
        people,
        ApiContext {
            frontend_url: config.app.frontend_url.clone(),
        },
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush the snapshot after the server has drained.
    if let Err(e) = store.persist().await {
        error!("Failed to save sessions on shutdown: {}", e);
    }
    info!("Shut down. Saved sessions to disk.");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
