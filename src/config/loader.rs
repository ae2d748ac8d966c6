//! Configuration loading from environment variables

use super::{ConnectionConfig, Validate};
use crate::errors::{DataverseError, Result};
use std::env;
use tracing::debug;

/// Prefix of every recognised environment variable
pub const ENV_PREFIX: &str = "DATAVERSE_";

impl ConnectionConfig {
    /// Load configuration from `DATAVERSE_*` environment variables
    pub fn from_env() -> Result<Self> {
        debug!("Loading connection configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Keys are the full variable names, e.g. `DATAVERSE_TENANT_ID`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|v| !v.trim().is_empty())
        };
        let required = |name: &str| {
            get(name).ok_or_else(|| {
                DataverseError::Config(format!("Missing environment variable {}{}", ENV_PREFIX, name))
            })
        };

        let mut config = ConnectionConfig::new(
            required("TENANT_ID")?,
            required("SERVICE_ROOT_URI")?,
            required("CLIENT_ID")?,
            required("CLIENT_SECRET")?,
        );

        if let Some(timeout) = get("TIMEOUT") {
            config.timeout = timeout
                .parse()
                .map_err(|e| DataverseError::Config(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(authority_host) = get("AUTHORITY_HOST") {
            config.authority_host = authority_host;
        }
        if let Some(page_size) = get("PAGE_SIZE") {
            config.page_size = Some(
                page_size
                    .parse()
                    .map_err(|e| DataverseError::Config(format!("Invalid page size: {}", e)))?,
            );
        }
        if let Some(max_pages) = get("MAX_PAGES") {
            config.max_pages = max_pages
                .parse()
                .map_err(|e| DataverseError::Config(format!("Invalid max pages: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }
}
