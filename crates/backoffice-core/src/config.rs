//! Configuration module
//!
//! Configuration is read once at startup from the environment (after loading a
//! `.env` file when present) and validated before any service is built. Every
//! credential the upload and publishing flows depend on is required; a missing
//! variable is a startup error rather than an unauthenticated call later on.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::constants::{DEFAULT_GRAPH_API_BASE, DEFAULT_GRAPH_API_TIMEOUT_SECS};

const DEFAULT_PORT: u16 = 3000;
const MIN_AUTH_SECRET_LEN: usize = 32;

/// Server and session settings
#[derive(Clone)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Shared secret of the external auth provider, used to verify session tokens
    pub auth_secret: String,
}

/// Object storage settings for presigned uploads
#[derive(Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, ...)
    pub endpoint_url: Option<String>,
}

/// Instagram Graph API settings
#[derive(Clone)]
pub struct InstagramConfig {
    pub access_token: String,
    pub account_id: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
    pub instagram: InstagramConfig,
}

impl Debug for BaseConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BaseConfig")
            .field("server_port", &self.server_port)
            .field("cors_origins", &self.cors_origins)
            .field("environment", &self.environment)
            .field("auth_secret", &"<redacted>")
            .finish()
    }
}

impl Debug for StorageConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl Debug for InstagramConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InstagramConfig")
            .field("access_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |keys: &[&str]| {
            keys.iter().find_map(|key| get(*key)).ok_or_else(|| {
                anyhow::anyhow!("{} must be set", keys.join(" or "))
            })
        };

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: match get("PORT") {
                Some(port) => port.parse::<u16>().map_err(|_| {
                    anyhow::anyhow!("PORT must be a valid port number, got '{}'", port)
                })?,
                None => DEFAULT_PORT,
            },
            cors_origins,
            environment,
            auth_secret: require(&["AUTH_SECRET", "NEXT_AUTH_SECRET"])?,
        };

        let storage = StorageConfig {
            bucket: require(&["AWS_BUCKET_NAME"])?,
            region: require(&["AWS_REGION"])?,
            access_key_id: require(&["AWS_ACCESS_KEY", "AWS_ACCESS_KEY_ID"])?,
            secret_access_key: require(&["AWS_SECRET_ACCESS_KEY"])?,
            endpoint_url: get("S3_ENDPOINT"),
        };

        let instagram = InstagramConfig {
            access_token: require(&["INSTAGRAM_ACCESS_TOKEN"])?,
            account_id: require(&["INSTAGRAM_USER_ID"])?,
            api_base: get("INSTAGRAM_API_BASE")
                .unwrap_or_else(|| DEFAULT_GRAPH_API_BASE.to_string()),
            timeout_secs: match get("INSTAGRAM_TIMEOUT_SECS") {
                Some(secs) => secs.parse::<u64>().map_err(|_| {
                    anyhow::anyhow!(
                        "INSTAGRAM_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        secs
                    )
                })?,
                None => DEFAULT_GRAPH_API_TIMEOUT_SECS,
            },
        };

        let config = Config {
            base,
            storage,
            instagram,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.auth_secret.len() < MIN_AUTH_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "AUTH_SECRET must be at least {} characters long",
                MIN_AUTH_SECRET_LEN
            ));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        validate_http_url("INSTAGRAM_API_BASE", &self.instagram.api_base)?;

        if self.instagram.timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "INSTAGRAM_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if let Some(ref endpoint) = self.storage.endpoint_url {
            validate_http_url("S3_ENDPOINT", endpoint)?;
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }
}

fn validate_http_url(name: &str, value: &str) -> Result<(), anyhow::Error> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| anyhow::anyhow!("{} must be a valid URL, got '{}': {}", name, value, e))?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if !matches!(url.scheme(), "https" | "http") || !has_host {
        return Err(anyhow::anyhow!(
            "{} must be an http(s) URL with a host, got '{}'",
            name,
            value
        ));
    }
    Ok(())
}
