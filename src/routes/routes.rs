//! Defines routes for the authorizer and presigned-URL endpoints.
//!
//! ## Structure
//! - `POST /authorize`     — Basic-Auth check, returns an Allow/Deny policy
//! - `POST /download-urls` — presigned fetch URLs for existing objects
//! - `POST /upload-urls`   — presigned upload URLs with generated object keys
//! - `GET  /healthz`       — liveness
//! - `GET  /readyz`        — readiness (bucket reachability)

use crate::{
    handlers::{
        authorizer_handlers::authorize,
        health_handlers::{healthz, readyz},
        url_handlers::{download_urls, upload_urls},
    },
    services::{auth_service::AuthService, s3_service::S3Service},
};
use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};

/// Shared state carried to all handlers. The sub-states split out via
/// `FromRef` so each handler extracts only the service it needs.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub s3: S3Service,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for S3Service {
    fn from_ref(state: &AppState) -> Self {
        state.s3.clone()
    }
}

/// Build and return the router for all endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // gateway authorizer
        .route("/authorize", post(authorize))
        // presigned URL generation
        .route("/download-urls", post(download_urls))
        .route("/upload-urls", post(upload_urls))
}
