//! Secret Santa API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use santa_common::config::AppConfig;

use santa_api::routes::create_router;
use santa_api::state::AppState;

/// Largest accepted request body, far above any realistic roster.
const MAX_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("santa_api=debug,santa_engine=debug,santa_notifier=info,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting Secret Santa API server...");

    // Load configuration
    let config = AppConfig::from_env()?;
    if !config.email_configured() {
        tracing::warn!(
            "Email not configured; set RESEND_API_KEY and EMAIL_FROM. Assignments will be logged instead"
        );
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::from_config(config);

    // Build router
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    Ok(())
}
