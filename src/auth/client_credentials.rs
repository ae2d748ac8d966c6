//! OAuth2 client credentials grant

use async_trait::async_trait;
use chrono::Utc;
use std::fmt;
use tracing::{debug, info};

use super::{AccessToken, TokenResponse, TokenSource};
use crate::config::ConnectionConfig;
use crate::errors::{DataverseError, Result, extract_error_message};

/// Service-to-service token flow for an app registration
pub struct ClientCredentials {
    token_endpoint: String,
    resource: String,
    client_id: String,
    client_secret: String,
    http_client: reqwest::Client,
}

impl ClientCredentials {
    pub fn from_config(config: &ConnectionConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DataverseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token_endpoint: config.token_endpoint(),
            resource: config.resource()?,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            http_client,
        })
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("token_endpoint", &self.token_endpoint)
            .field("resource", &self.resource)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenSource for ClientCredentials {
    async fn acquire(&self) -> Result<AccessToken> {
        debug!("Requesting access token from {}", self.token_endpoint);

        let form = [
            ("resource", self.resource.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let issued_at = Utc::now();
        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DataverseError::Auth(format!(
                "token request failed ({}): {}",
                status.as_u16(),
                token_error_message(status, &body)
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| DataverseError::Auth(format!("malformed token response: {}", e)))?;

        let token = token.into_token(issued_at);
        info!(
            "Access token acquired for {} (expires at {:?})",
            self.resource,
            token.expires_at()
        );
        Ok(token)
    }
}

// Azure AD reports failures as {"error":"invalid_client","error_description":"..."}
fn token_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error_description")
                .and_then(|d| d.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| extract_error_message(status, body))
}
