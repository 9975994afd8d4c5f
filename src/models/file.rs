//! Request/response types for the download and upload URL endpoints.

use serde::Serialize;

/// A single file descriptor in an upload-URL request. Built field-by-field by
/// the upload validator, which owns the wire-level parsing.
#[derive(Debug, Clone)]
pub struct FileRequest {
    pub name: String,
    pub extension: String,
}

/// One entry of an upload-URL response: the descriptor echoed back plus the
/// generated object key and the presigned upload URL bound to it.
#[derive(Debug, Clone, Serialize)]
pub struct UploadUrlEntry {
    pub name: String,
    pub extension: String,

    #[serde(rename = "s3UploadUrl")]
    pub s3_upload_url: String,

    #[serde(rename = "s3ObjectName")]
    pub s3_object_name: String,
}

/// One entry of a download-URL response.
///
/// `s3_fetch_url` is `None` (serialized as `null`) when the object does not
/// exist or the per-item storage call faulted.
#[derive(Debug, Clone, Serialize)]
pub struct FetchUrlEntry {
    #[serde(rename = "s3ObjectName")]
    pub s3_object_name: String,

    #[serde(rename = "s3FetchUrl")]
    pub s3_fetch_url: Option<String>,
}
