// Configuration resolved at process start.
//
// Values come from command-line flags first, then environment variables.
// Before parsing, `load_env_files` pulls a `.env` from the working directory
// and `client-admin.env` from the user's config directory into the
// environment; variables already set are never overridden.

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::Args;
use thiserror::Error;

/// Name of the per-user env file under `<config dir>/client-admin/`.
pub const USER_ENV_FILE: &str = "client-admin.env";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no statements bucket configured; pass --bucket or set CLIENT_ADMIN_BUCKET")]
    MissingBucket,
    #[error("table name must not be empty")]
    EmptyTable,
}

/// Service identifiers and SDK overrides shared by every binary.
#[derive(Args, Debug, Clone, Default)]
pub struct Settings {
    /// Client records table.
    #[arg(long = "table", env = "CLIENT_ADMIN_TABLE", default_value = "Clients")]
    pub table_name: String,

    /// Bucket holding client statements.
    #[arg(long = "bucket", env = "CLIENT_ADMIN_BUCKET")]
    pub bucket_name: Option<String>,

    /// AWS region; falls back to the SDK's default chain.
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Named profile from the shared AWS config files.
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Custom endpoint, e.g. a local DynamoDB/S3 emulator.
    #[arg(long, env = "CLIENT_ADMIN_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Address the bucket by path instead of virtual host.
    #[arg(
        long,
        env = "CLIENT_ADMIN_FORCE_PATH_STYLE",
        value_parser = FalseyValueParser::new()
    )]
    pub force_path_style: bool,
}

impl Settings {
    /// The configured bucket, rejecting a missing or blank name.
    pub fn require_bucket(&self) -> Result<&str, ConfigError> {
        match self.bucket_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ConfigError::MissingBucket),
        }
    }

    pub fn require_table(&self) -> Result<&str, ConfigError> {
        let name = self.table_name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        Ok(name)
    }
}

/// Location of the per-user env file, if the platform has a config dir.
pub fn user_env_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("client-admin").join(USER_ENV_FILE))
}

/// Load `.env` and the per-user env file. Missing files are not an error.
pub fn load_env_files() {
    dotenvy::dotenv().ok();
    if let Some(path) = user_env_path() {
        dotenvy::from_path(path).ok();
    }
}
