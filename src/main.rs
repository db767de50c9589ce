use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};

use staybook::logging::{init_tracing, shutdown_tracer};
use staybook::metrics::{init_metrics, metrics_app};
use staybook::router::init_router;
use staybook::state::init_app_state;
use staybook_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics()? {
        let metrics_listener = TcpListener::bind(server_config.metrics_address()).await?;
        info!("📈 Metrics available at http://{}/metrics", server_config.metrics_address());
        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let state = init_app_state().await?;
    let app = init_router(state);

    let listener = TcpListener::bind(server_config.address()).await?;
    info!("🚀 Server running on http://{}", server_config.address());
    info!("📚 Swagger UI available at http://{}/swagger-ui", server_config.address());
    info!("📖 Scalar UI available at http://{}/scalar", server_config.address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
