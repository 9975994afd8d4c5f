use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fmt;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

/// Credentials the authorizer accepts.
///
/// The original deployment carried two discrete password slots (`ps1` plus an
/// optional `ps2`); here they collapse into a membership check against a
/// non-empty set, which generalizes to any number of accepted secrets.
#[derive(Clone)]
pub struct AuthConfig {
    pub username: String,
    pub passwords: Vec<String>,
}

/// Target bucket and key-prefix settings for presigned URL generation.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub region: String,
    pub bucket_name: String,
    pub file_path: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Presigned URL + Basic-Auth authorizer API")]
pub struct Args {
    /// Host to bind to (overrides FILE_URL_SERVICE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides FILE_URL_SERVICE_PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    ///
    /// The auth/storage variable names (`username`, `ps1`, `ps2`, `region`,
    /// `bucketName`, `filePath`) are part of the deployment contract and are
    /// read verbatim.
    pub fn from_env_and_args() -> Result<Self> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("FILE_URL_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("FILE_URL_SERVICE_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing FILE_URL_SERVICE_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading FILE_URL_SERVICE_PORT"),
        };

        // --- Auth secrets ---
        let username = env::var("username").context("reading `username`")?;
        let ps1 = env::var("ps1").context("reading `ps1`")?;
        let mut passwords = vec![ps1];
        if let Ok(ps2) = env::var("ps2") {
            if !ps2.is_empty() {
                passwords.push(ps2);
            }
        }

        // --- Storage target ---
        let region = env::var("region").unwrap_or_else(|_| "us-east-1".into());
        let bucket_name = env::var("bucketName").context("reading `bucketName`")?;
        let file_path = env::var("filePath").unwrap_or_default();

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            auth: AuthConfig {
                username,
                passwords,
            },
            storage: StorageConfig {
                region,
                bucket_name,
                file_path,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Keep secrets out of startup logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field(
                "passwords",
                &format_args!("<{} redacted>", self.passwords.len()),
            )
            .finish()
    }
}
