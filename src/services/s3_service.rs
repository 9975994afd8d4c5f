//! src/services/s3_service.rs
//!
//! S3Service — presigned URL generation against the configured bucket.
//! Download URLs are minted only for objects that pass an existence check;
//! upload URLs are minted for synthesized, timestamp-unique object keys with
//! the inferred content type bound into the signature.

use crate::config::StorageConfig;
use crate::errors::ApiError;
use crate::models::file::{FetchUrlEntry, FileRequest, UploadUrlEntry};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::presigning::{PresigningConfig, PresigningConfigError};
use chrono::{DateTime, Local};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Fetch URLs stay valid for 5 minutes.
const FETCH_URL_EXPIRY: Duration = Duration::from_secs(300);

/// Upload URLs stay valid for 2 minutes.
const UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum S3UrlError {
    #[error("object `{key}` is not accessible")]
    Head {
        key: String,
        #[source]
        source: SdkError<HeadObjectError>,
    },
    #[error("failed to presign fetch url for `{key}`")]
    PresignFetch {
        key: String,
        #[source]
        source: SdkError<GetObjectError>,
    },
    #[error("failed to presign upload url for `{key}`")]
    PresignUpload {
        key: String,
        #[source]
        source: SdkError<PutObjectError>,
    },
    #[error("bucket `{bucket}` is not reachable")]
    HeadBucket {
        bucket: String,
        #[source]
        source: SdkError<HeadBucketError>,
    },
    #[error(transparent)]
    Presigning(#[from] PresigningConfigError),
}

pub type S3UrlResult<T> = Result<T, S3UrlError>;

/// S3Service provides the two URL-minting operations:
/// - Fetch URLs: existence check + presigned GET, per-item fault absorbing
/// - Upload URLs: key synthesis + presigned PUT with a content-type constraint
///
/// The wrapped client is stateless with respect to request data, so a single
/// instance is shared across all invocations via handler state.
#[derive(Clone)]
pub struct S3Service {
    client: Client,
    bucket: String,
    file_path: String,
}

impl S3Service {
    /// Create a new S3Service targeting the configured bucket and key prefix.
    pub fn new(client: Client, cfg: &StorageConfig) -> Self {
        Self {
            client,
            bucket: cfg.bucket_name.clone(),
            file_path: cfg.file_path.clone(),
        }
    }

    /// Generate a presigned fetch URL per object name, preserving input order.
    ///
    /// Items are fully independent: a missing object or a faulted storage call
    /// degrades that single entry to a null URL and the batch continues.
    pub async fn generate_fetch_urls(&self, object_names: &[String]) -> Vec<FetchUrlEntry> {
        let mut entries = Vec::with_capacity(object_names.len());

        for object_name in object_names {
            let url = match self.fetch_url(object_name).await {
                Ok(url) => Some(url),
                Err(err @ S3UrlError::Head { .. }) => {
                    debug!("skipping `{}`: {:#}", object_name, anyhow::Error::from(err));
                    None
                }
                Err(err) => {
                    error!(
                        "fetch url generation failed for `{}`: {:#}",
                        object_name,
                        anyhow::Error::from(err)
                    );
                    None
                }
            };

            entries.push(FetchUrlEntry {
                s3_object_name: object_name.clone(),
                s3_fetch_url: url,
            });
        }

        entries
    }

    /// Existence check followed by a presigned GET for a single key.
    async fn fetch_url(&self, key: &str) -> S3UrlResult<String> {
        self.client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|source| S3UrlError::Head {
                key: key.to_string(),
                source,
            })?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(FETCH_URL_EXPIRY)?)
            .await
            .map_err(|source| S3UrlError::PresignFetch {
                key: key.to_string(),
                source,
            })?;

        Ok(presigned.uri().to_string())
    }

    /// Generate an upload URL + object key per descriptor, preserving order.
    ///
    /// Descriptors are assumed pre-validated; a storage-SDK fault here fails
    /// the whole batch.
    pub async fn generate_upload_urls(
        &self,
        files: Vec<FileRequest>,
    ) -> S3UrlResult<Vec<UploadUrlEntry>> {
        let mut entries = Vec::with_capacity(files.len());

        for file in files {
            let key = self.object_key(&file.name, &file.extension);
            let content_type = content_type_for(&file.extension);

            let presigned = self
                .client
                .put_object()
                .bucket(&self.bucket)
                .key(&key)
                .content_type(content_type)
                .presigned(PresigningConfig::expires_in(UPLOAD_URL_EXPIRY)?)
                .await
                .map_err(|source| S3UrlError::PresignUpload {
                    key: key.clone(),
                    source,
                })?;

            entries.push(UploadUrlEntry {
                name: file.name,
                extension: file.extension,
                s3_upload_url: presigned.uri().to_string(),
                s3_object_name: key,
            });
        }

        Ok(entries)
    }

    /// Readiness probe: is the configured bucket reachable with our identity?
    pub async fn check_bucket(&self) -> S3UrlResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|source| S3UrlError::HeadBucket {
                bucket: self.bucket.clone(),
                source,
            })?;
        Ok(())
    }

    /// Synthesize the object key for one descriptor:
    /// `<prefix><timestamp>_<name>.<extension>`.
    ///
    /// The prefix is forced to end with `/` when non-empty. Uniqueness comes
    /// from the millisecond timestamp; same-millisecond collisions within a
    /// batch are accepted.
    fn object_key(&self, name: &str, extension: &str) -> String {
        let prefix = if self.file_path.is_empty() || self.file_path.ends_with('/') {
            self.file_path.clone()
        } else {
            format!("{}/", self.file_path)
        };

        format!(
            "{}{}_{}.{}",
            prefix,
            timestamp_string(Local::now()),
            name,
            extension
        )
    }
}

/// Millisecond-precision, lexically sortable timestamp on the local clock.
fn timestamp_string(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S-%3f").to_string()
}

/// Map a file extension (case-insensitive) to the content type bound into the
/// upload URL. Unknown extensions fall back to a generic binary type.
fn content_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        _ => "application/octet-stream",
    }
}

impl From<S3UrlError> for ApiError {
    fn from(err: S3UrlError) -> Self {
        error!("storage fault: {:#}", anyhow::Error::from(err));
        ApiError::internal("Internal server error")
    }
}
