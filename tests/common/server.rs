//! Mock Web API server

use dataverse_client::{AccessToken, ConnectionConfig, DataverseClient};
use wiremock::MockServer;

/// Path of the service root on the mock server
pub const API_ROOT: &str = "/api/data/v9.2";

/// Bearer token presented by clients built with [`MockWebApi::client`]
pub const TEST_TOKEN: &str = "integration-token";

/// Mock server plus connection settings pointing at it
pub struct MockWebApi {
    pub server: MockServer,
}

impl MockWebApi {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> ConnectionConfig {
        ConnectionConfig::new(
            "tenant",
            format!("{}{}", self.server.uri(), API_ROOT),
            "client",
            "secret",
        )
        .with_authority_host(self.server.uri())
    }

    pub fn client(&self) -> DataverseClient {
        self.client_with(self.config())
    }

    pub fn client_with(&self, config: ConnectionConfig) -> DataverseClient {
        DataverseClient::with_token(config, AccessToken::bearer(TEST_TOKEN))
            .expect("client for mock server")
    }

    /// Server path of a collection, e.g. `/api/data/v9.2/accounts`
    pub fn path(&self, relative: &str) -> String {
        format!("{}/{}", API_ROOT, relative)
    }

    /// Absolute URL as the service would report it in links
    pub fn link(&self, relative: &str) -> String {
        format!("{}{}/{}", self.server.uri(), API_ROOT, relative)
    }
}
