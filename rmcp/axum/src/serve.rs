//! Streamable HTTP serving.

use crate::health;
use axum::Router;
use rmcp::{
    RoleServer, Service,
    transport::streamable_http_server::{
        StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
    },
};
use std::net::SocketAddr;

/// Build a router serving MCP at `endpoint` plus `GET /health`.
///
/// `factory` is called once per MCP session.
pub fn router<S, F>(endpoint: &str, server_name: &str, factory: F) -> Router
where
    S: Service<RoleServer> + Send + 'static,
    F: Fn() -> Result<S, std::io::Error> + Send + Sync + 'static,
{
    let service = StreamableHttpService::new(
        factory,
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );
    Router::new()
        .nest_service(endpoint, service)
        .merge(health::route(server_name))
}

/// Bind `addr` and serve `app` until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(e) => {
            // Without a signal handler, run until killed.
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::router;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use rmcp::ServerHandler;
    use tower::ServiceExt;

    #[derive(Clone)]
    struct Idle;

    impl ServerHandler for Idle {}

    #[tokio::test]
    async fn health_is_mounted_beside_mcp() {
        let app = router("/mcp", "idle", || Ok(Idle));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let app = router("/mcp", "idle", || Ok(Idle));
        let response = app
            .oneshot(Request::get("/files").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
