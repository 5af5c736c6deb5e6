use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use plaza_api::{create_router, AppState};
use plaza_core::{
    bootstrap::{init_database, load_config},
    logging,
    provider::ProviderRegistry,
    repository::{MessageRepository, StreamerRepository},
    service::{ChannelHub, ChatService, LiveStatusService, RetentionSweeper},
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = load_config()?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    info!("Plaza server starting...");
    info!("HTTP address: {}", config.http_address());

    // 3. Initialize database
    let pool = init_database(&config).await?;

    // 4. Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            error!("Failed to run migrations: {}", e);
            anyhow::anyhow!("Migration failed: {e}")
        })?;
    info!("Migrations completed");

    // 5. Wire the persistence gateway and services
    let message_repository = Arc::new(MessageRepository::new(pool.clone()));
    let streamer_repository = Arc::new(StreamerRepository::new(pool));

    let hub = Arc::new(ChannelHub::new());
    let chat_service = Arc::new(ChatService::new(
        message_repository.clone(),
        hub.clone(),
        config.chat.clone(),
    ));

    let registry = Arc::new(ProviderRegistry::from_config(&config.live));
    let live_service = Arc::new(LiveStatusService::new(
        streamer_repository,
        registry,
        config.cache_ttl(),
    ));

    // 6. Start the retention sweep, independent of connection handling
    let sweeper = RetentionSweeper::new(message_repository, config.chat.clone());
    let _sweep_task = sweeper.start();
    info!(
        interval_hours = config.chat.sweep_interval_hours,
        "Retention sweep started"
    );

    // 7. Serve HTTP
    let router = create_router(AppState {
        chat_service,
        live_service,
        hub,
    });

    let listener = tokio::net::TcpListener::bind(config.http_address()).await?;
    info!("Listening on {}", config.http_address());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Plaza server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
