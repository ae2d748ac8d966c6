//! Configuration validation

use super::ConnectionConfig;
use crate::errors::{DataverseError, Result};
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for ConnectionConfig {
    fn validate(&self) -> Result<()> {
        if self.tenant_id.trim().is_empty() {
            return Err(DataverseError::Config("Tenant id cannot be empty".to_string()));
        }

        if self.client_id.trim().is_empty() {
            return Err(DataverseError::Config("Client id cannot be empty".to_string()));
        }

        validate_http_url(&self.service_root_uri, "Service root URI")?;
        validate_http_url(&self.authority_host, "Authority host")?;

        if self.timeout == 0 {
            return Err(DataverseError::Config(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_pages == 0 {
            return Err(DataverseError::Config(
                "Max pages must be greater than 0".to_string(),
            ));
        }

        if self.page_size == Some(0) {
            return Err(DataverseError::Config(
                "Page size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_http_url(value: &str, context: &str) -> Result<()> {
    let url = Url::parse(value.trim())
        .map_err(|e| DataverseError::Config(format!("{} has invalid URL format: {}", context, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(DataverseError::Config(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(DataverseError::Config(format!(
            "{} URL must have a valid host",
            context
        )));
    }

    Ok(())
}
