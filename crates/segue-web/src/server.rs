use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use segue_core::Recommender;
use tokio::net::TcpListener;

use crate::error::{WebError, WebResult};
use crate::handlers;

/// State shared by every handler: the read-only recommender.
#[derive(Debug, Clone)]
pub struct AppState {
    recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>) -> Self {
        Self { recommender }
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }
}

/// Build the router for all endpoints.
pub fn router(recommender: Arc<Recommender>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/recommend",
            get(handlers::home).post(handlers::recommend_form),
        )
        .route("/api/recommend", get(handlers::recommend_api))
        .route("/health", get(handlers::health))
        .with_state(AppState::new(recommender))
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(recommender: Arc<Recommender>, addr: &str) -> WebResult<()> {
    let app = router(recommender);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| WebError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    let local = listener
        .local_addr()
        .map_or_else(|_| addr.to_string(), |a| a.to_string());
    log::info!("Listening on http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(WebError::Serve)?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler there is nothing to wait for; keep
        // serving until the process is killed.
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
