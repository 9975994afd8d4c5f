pub mod auth_service;
pub mod s3_service;
