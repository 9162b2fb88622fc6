use intake_core::IngestConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "intake=debug,axum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = IngestConfig::from_env();
    let upload_dir =
        std::env::var("INTAKE_UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());
    let port: u16 = std::env::var("INTAKE_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);

    let app = intake_http::router(config, upload_dir.clone().into());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, upload_dir = %upload_dir, "intake server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
