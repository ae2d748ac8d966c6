//! Client construction and transport setup

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::auth::{AccessToken, ClientCredentials, TokenSource};
use crate::batch::ComposeContext;
use crate::codec::SerializerOptions;
use crate::config::{ConnectionConfig, Validate};
use crate::errors::{DataverseError, Result};

const ODATA_MAX_VERSION: &str = "odata-maxversion";
const ODATA_VERSION: &str = "odata-version";
const PREFER: &str = "prefer";

/// Authenticated client for one Web API service root
#[derive(Debug, Clone)]
pub struct DataverseClient {
    pub(crate) config: ConnectionConfig,
    pub(crate) service_root: Url,
    pub(crate) http_client: reqwest::Client,
    token: AccessToken,
    pub(crate) serializer_options: SerializerOptions,
}

impl DataverseClient {
    /// Validate `config`, acquire a token with the client credentials grant and
    /// build the client
    pub async fn connect(config: ConnectionConfig) -> Result<Self> {
        config.validate()?;
        let credentials = ClientCredentials::from_config(&config)?;
        Self::connect_with(config, &credentials).await
    }

    /// Build the client with a token from an arbitrary source
    pub async fn connect_with(config: ConnectionConfig, source: &dyn TokenSource) -> Result<Self> {
        let token = source.acquire().await?;
        Self::with_token(config, token)
    }

    /// Build the client around an already acquired token
    pub fn with_token(config: ConnectionConfig, token: AccessToken) -> Result<Self> {
        config.validate()?;
        let service_root = config.service_root()?;

        if token.is_expired() {
            warn!("Building client with an expired access token");
        }

        let http_client = build_http_client(&config, &token, config.timeout())?;

        info!("DataverseClient created for {}", service_root);

        Ok(Self {
            config,
            service_root,
            http_client,
            token,
            serializer_options: SerializerOptions::default(),
        })
    }

    /// Rebuild the transport with a different per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = build_http_client(&self.config, &self.token, timeout)?;
        Ok(self)
    }

    pub fn with_serializer_options(mut self, options: SerializerOptions) -> Self {
        self.serializer_options = options;
        self
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Service root, always ending in `/`
    pub fn service_root(&self) -> &Url {
        &self.service_root
    }

    pub fn serializer_options(&self) -> &SerializerOptions {
        &self.serializer_options
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Settings used when composing batches for this client
    pub fn compose_context(&self) -> ComposeContext<'_> {
        ComposeContext::new(&self.service_root, &self.serializer_options)
    }

    /// Absolute URL of a path relative to the service root
    pub(crate) fn url(&self, relative: &str) -> String {
        format!("{}{}", self.service_root, relative)
    }
}

fn build_http_client(
    config: &ConnectionConfig,
    token: &AccessToken,
    timeout: Duration,
) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(default_headers(config, token)?)
        .build()
        .map_err(|e| DataverseError::Config(format!("Failed to create HTTP client: {}", e)))
}

fn default_headers(config: &ConnectionConfig, token: &AccessToken) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(ODATA_MAX_VERSION), HeaderValue::from_static("4.0"));
    headers.insert(HeaderName::from_static(ODATA_VERSION), HeaderValue::from_static("4.0"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let prefer = match config.page_size {
        Some(size) => format!("odata.include-annotations=\"*\",odata.maxpagesize={}", size),
        None => "odata.include-annotations=\"*\"".to_string(),
    };
    headers.insert(
        HeaderName::from_static(PREFER),
        HeaderValue::from_str(&prefer)
            .map_err(|e| DataverseError::Config(format!("Invalid Prefer header: {}", e)))?,
    );

    let mut authorization = HeaderValue::from_str(&token.authorization())
        .map_err(|_| DataverseError::Auth("access token is not a valid header value".to_string()))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    Ok(headers)
}
