use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use axum::Router;
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use routes::routes::AppState;
use services::{auth_service::AuthService, s3_service::S3Service};

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting file-url-service with config: {:?}", cfg);

    // --- Initialize S3 client ---
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(cfg.storage.region.clone()))
        .load()
        .await;
    let client = aws_sdk_s3::Client::new(&sdk_config);

    // --- Initialize core services ---
    let state = AppState {
        auth: AuthService::new(cfg.auth.clone()),
        s3: S3Service::new(client, &cfg.storage),
    };

    // --- Build router ---
    let app: Router = routes::routes::routes().with_state(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
