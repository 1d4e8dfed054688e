//! HTTP server for the recommendation page

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handler::{index_handler, recommend_handler, AppState};
use crate::config::HttpConfig;

/// The one route: GET renders the form, POST recommends
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(recommend_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server serving the recommendation page
pub struct HttpServer {
    state: AppState,
    address: String,
}

impl HttpServer {
    pub fn new(state: AppState, config: &HttpConfig) -> Self {
        Self {
            state,
            address: config.bind_address(),
        }
    }

    /// Bind and serve until the process stops
    pub async fn start(&self) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.address).await?;
        info!("Recommender available at http://{}", listener.local_addr()?);
        axum::serve(listener, router(self.state.clone())).await
    }
}
