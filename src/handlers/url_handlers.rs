//! HTTP handlers for the download- and upload-URL endpoints.
//!
//! Bodies are parsed by hand rather than through the `Json` extractor so the
//! two client-error variants (malformed JSON vs. wrong shape) keep their
//! distinct messages. URL minting is delegated to `S3Service`.

use crate::{
    errors::ApiError,
    models::file::{FetchUrlEntry, FileRequest, UploadUrlEntry},
    services::s3_service::S3Service,
};
use axum::{Json, extract::State};
use serde_json::Value;

/// `POST /download-urls`
///
/// Body: `{"s3ObjectNames": [..]}`. Responds 200 with one entry per name in
/// input order; a missing object or per-item storage fault yields a null URL
/// for that entry only.
pub async fn download_urls(
    State(s3): State<S3Service>,
    body: String,
) -> Result<Json<Vec<FetchUrlEntry>>, ApiError> {
    let object_names = parse_object_names(&body)?;
    let entries = s3.generate_fetch_urls(&object_names).await;
    Ok(Json(entries))
}

/// `POST /upload-urls`
///
/// Body: array of `{name, extension}` descriptors. Validation is batch-wide:
/// every violation is collected and any violation rejects the whole request.
pub async fn upload_urls(
    State(s3): State<S3Service>,
    body: String,
) -> Result<Json<Vec<UploadUrlEntry>>, ApiError> {
    let files = parse_file_requests(&body)?;
    let entries = s3.generate_upload_urls(files).await?;
    Ok(Json(entries))
}

/// Extract the `s3ObjectNames` array from a download-URL request body.
fn parse_object_names(body: &str) -> Result<Vec<String>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("Request body is required"));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|_| ApiError::bad_request("Invalid JSON in request body"))?;

    value
        .get("s3ObjectNames")
        .and_then(|names| serde_json::from_value::<Vec<String>>(names.clone()).ok())
        .ok_or_else(|| {
            ApiError::bad_request(
                "Request body must contain a \"s3ObjectNames\" property which is an array of object names",
            )
        })
}

/// Parse and validate an upload-URL request body into file descriptors.
///
/// Violations are collected across the whole batch; a non-object element is
/// reported as missing both properties, mirroring a descriptor with neither
/// set.
fn parse_file_requests(body: &str) -> Result<Vec<FileRequest>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::bad_request("Request body is required"));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|_| ApiError::bad_request("Invalid JSON in request body"))?;

    let Value::Array(items) = value else {
        return Err(ApiError::bad_request(
            "Request body must be an array of file objects",
        ));
    };

    let mut errors = Vec::new();
    let mut files = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let name = item.get("name").and_then(Value::as_str).unwrap_or("");
        let extension = item.get("extension").and_then(Value::as_str).unwrap_or("");

        if name.is_empty() {
            errors.push(format!(
                "File at index {} is missing the 'name' property",
                index
            ));
        }
        if extension.is_empty() {
            errors.push(format!(
                "File at index {} is missing the 'extension' property",
                index
            ));
        }

        files.push(FileRequest {
            name: name.to_string(),
            extension: extension.to_string(),
        });
    }

    if !errors.is_empty() {
        return Err(ApiError::validation("Validation errors", errors));
    }

    Ok(files)
}
