//! Server Implementation
//!
//! HTTP 服务器启动和管理

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::tasks::{SESSION_PURGE_INTERVAL, spawn_session_purge};
use crate::core::{Config, Result, ServerState};

/// 请求体上限 (图片上传 5MB + multipart 开销)
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Build the Axum router with all routes, middleware and state
///
/// Used by the HTTP server and by integration tests (oneshot calls).
pub fn build_app(state: ServerState) -> Router {
    let cors = if state.config.is_development() {
        CorsLayer::very_permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::products::router())
        .merge(crate::api::cart::router())
        .merge(crate::api::orders::router())
        .merge(crate::api::tables::router())
        .merge(crate::api::html::router())
        .merge(crate::api::settings::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
        // ========== Tower HTTP Middleware ==========
        .layer(cors)
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::x_request_id())
        // Request ID - outermost, so the trace span can see it
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        // Start background tasks
        let purge = spawn_session_purge(state.pool.clone(), SESSION_PURGE_INTERVAL);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Storefront server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, build_app(state))
            .with_graceful_shutdown(shutdown)
            .await?;

        purge.abort();
        Ok(())
    }
}
