//! HTTP server lifecycle: bind, serve, graceful shutdown.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::info;

use crate::api::router::service_router;
use crate::api::types::ApiContext;

/// Handle to a running server. Dropping it without calling
/// [`ServerHandle::shutdown`] leaves the server running until the
/// process exits.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ServerHandle {
    /// The address the server actually bound (resolves port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal the server to stop accepting connections and drain.
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Bind `bind_addr` and serve the API until shutdown is signalled.
pub async fn start_server(
    ctx: ApiContext,
    bind_addr: SocketAddr,
) -> Result<ServerHandle, std::io::Error> {
    let listener = TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let app = service_router(ctx);

    tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = serve.await {
            tracing::error!(error = %e, "server terminated with error");
        }
    });

    info!(%addr, "listening");
    Ok(ServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_ctx() -> (ApiContext, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("result");
        std::fs::create_dir_all(&output_dir).unwrap();

        let config = AppConfig {
            db_path: dir.path().join("analysis.db"),
            output_dir,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            public_base_url: "http://localhost:8000".into(),
        };
        let ctx = ApiContext::new(config);
        ctx.store.ensure_schema().unwrap();
        (ctx, dir)
    }

    #[tokio::test]
    async fn serves_probe_over_tcp() {
        let (ctx, _dir) = test_ctx();
        let mut handle = start_server(ctx, "127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();

        let url = format!("http://{}/", handle.addr());
        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

        handle.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (ctx, _dir) = test_ctx();
        let mut handle = start_server(ctx, "127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        handle.shutdown();
        handle.shutdown();
    }
}
