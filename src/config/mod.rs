//! Connection configuration
//!
//! Settings for reaching a Web API instance: where it lives, the app
//! registration used to obtain a token, and transport limits. Loadable from
//! YAML or from `DATAVERSE_*` environment variables.

mod loader;
mod validation;


pub use loader::ENV_PREFIX;
pub use validation::Validate;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::errors::{DataverseError, Result};

/// Default Azure AD authority
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Connection settings for one Web API instance
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Azure AD tenant id
    pub tenant_id: String,
    /// Service root, e.g. `https://org.crm.dynamics.com/api/data/v9.2/`
    pub service_root_uri: String,
    /// App registration client id
    pub client_id: String,
    /// App registration client secret
    #[serde(default, skip_serializing)]
    pub client_secret: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// OAuth2 authority
    #[serde(default = "default_authority_host")]
    pub authority_host: String,
    /// Preferred page size for collection queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Upper bound on pages fetched by one paginated retrieval
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_timeout() -> u64 {
    60
}

fn default_authority_host() -> String {
    DEFAULT_AUTHORITY_HOST.to_string()
}

fn default_max_pages() -> usize {
    1000
}

impl ConnectionConfig {
    pub fn new(
        tenant_id: impl Into<String>,
        service_root_uri: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            service_root_uri: service_root_uri.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            timeout: default_timeout(),
            authority_host: default_authority_host(),
            page_size: None,
            max_pages: default_max_pages(),
        }
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = authority_host.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Load and validate a YAML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading connection configuration from: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|e| {
            DataverseError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            DataverseError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        config.validate()?;
        debug!("Connection configuration loaded");
        Ok(config)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Service root as a URL ending in `/`
    pub fn service_root(&self) -> Result<Url> {
        let trimmed = self.service_root_uri.trim();
        if trimmed.ends_with('/') {
            Ok(Url::parse(trimmed)?)
        } else {
            Ok(Url::parse(&format!("{}/", trimmed))?)
        }
    }

    /// Scheme and authority of the service root, the OAuth2 `resource`
    pub fn resource(&self) -> Result<String> {
        let root = self.service_root()?;
        let host = root.host_str().ok_or_else(|| {
            DataverseError::Config(format!("Service root has no host: {}", root))
        })?;

        Ok(match root.port() {
            Some(port) => format!("{}://{}:{}", root.scheme(), host, port),
            None => format!("{}://{}", root.scheme(), host),
        })
    }

    /// Token endpoint for the client credentials grant
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/token",
            self.authority_host.trim_end_matches('/'),
            self.tenant_id
        )
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("tenant_id", &self.tenant_id)
            .field("service_root_uri", &self.service_root_uri)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("timeout", &self.timeout)
            .field("authority_host", &self.authority_host)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}
