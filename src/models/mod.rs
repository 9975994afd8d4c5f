//! Wire-level data models for the authorizer and URL-generation endpoints.
//!
//! These types mirror the gateway contract exactly (field casing included)
//! and serialize naturally as JSON via `serde`.

pub mod authorizer;
pub mod file;
