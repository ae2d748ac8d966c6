//! Bearer token acquisition
//!
//! The client only needs a valid access token. [`ClientCredentials`] performs
//! the OAuth2 client credentials grant against Azure AD; [`StaticToken`] wraps
//! a token obtained elsewhere.

mod client_credentials;

pub use client_credentials::ClientCredentials;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::errors::Result;

/// Source of bearer tokens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain a token valid for the Web API
    async fn acquire(&self) -> Result<AccessToken>;
}

/// Bearer token with its expiry
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token_type: String,
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Bearer token without a known expiry
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            token_type: "Bearer".to_string(),
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn secret(&self) -> &str {
        &self.access_token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }

    /// `Authorization` header value
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("access_token", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub access_token: String,
    // v1 endpoints send this as a string
    #[serde(default, deserialize_with = "seconds_from_string_or_number")]
    pub expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenResponse {
    pub fn into_token(self, issued_at: DateTime<Utc>) -> AccessToken {
        AccessToken {
            token_type: self.token_type,
            access_token: self.access_token,
            expires_at: self.expires_in.map(|s| issued_at + Duration::seconds(s)),
        }
    }
}

fn seconds_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(i64),
        Text(String),
    }

    match Option::<Seconds>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Seconds::Number(n)) => Ok(Some(n)),
        Some(Seconds::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Pre-acquired token
#[derive(Debug, Clone)]
pub struct StaticToken(AccessToken);

impl StaticToken {
    pub fn new(token: AccessToken) -> Self {
        Self(token)
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn acquire(&self) -> Result<AccessToken> {
        Ok(self.0.clone())
    }
}
