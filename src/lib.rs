//! # dataverse-client
//!
//! Async client for the Dataverse / Dynamics 365 Web API (OData v4).
//!
//! ## Features
//!
//! - **Batch composition**: heterogeneous create/update/upsert/delete requests
//!   grouped into atomic changesets and sent as one `multipart/mixed` `$batch`
//! - **Paginated retrieval**: follows `@odata.nextLink` continuations into one
//!   ordered result, bounded by a configurable page ceiling
//! - **Single-record CRUD** with ids read back from `OData-EntityId`
//! - **Client credentials** token acquisition against Azure AD
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dataverse_client::{Batch, ChangeRequest, ChangeSet, ConnectionConfig, DataverseClient};
//! use serde::{Deserialize, Serialize};
//! use uuid::Uuid;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Account {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     accountid: Option<Uuid>,
//!     name: String,
//! }
//!
//! dataverse_client::table_row!(Account, "account", "accounts", accountid);
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DataverseClient::connect(ConnectionConfig::from_env()?).await?;
//!
//!     let accounts: Vec<Account> = client.retrieve_all("?$select=name").await?;
//!     println!("{} accounts", accounts.len());
//!
//!     let mut changeset = ChangeSet::new();
//!     changeset.add(ChangeRequest::create(Account { accountid: None, name: "Contoso".into() }));
//!
//!     let mut batch = Batch::new();
//!     batch.add(changeset);
//!     client.execute_batch(&batch).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod batch;
pub mod client;
pub mod codec;
pub mod config;
pub mod errors;
pub mod metadata;

// Re-export main types
pub use auth::{AccessToken, ClientCredentials, StaticToken, TokenSource};
pub use batch::{
    Action, Batch, BatchItem, ChangeRequest, ChangeSet, ComposeContext, Composable, MimePart,
    RetrieveRequest,
};
pub use client::{DataverseClient, Page};
pub use codec::SerializerOptions;
pub use config::ConnectionConfig;
pub use errors::{DataverseError, Result};
pub use metadata::TableRow;

// Used by `table_row!`
#[doc(hidden)]
pub use uuid;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
