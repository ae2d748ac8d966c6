//! OData `$batch` composition
//!
//! Builds the `multipart/mixed` request body of a batch:
//!
//! ```text
//! Batch (boundary batch_{id})
//! ├── ChangeSet (boundary changeset_{id})
//! │   ├── ChangeRequest  application/http, Content-ID
//! │   └── ChangeRequest
//! ├── ChangeRequest      standalone change
//! └── RetrieveRequest    standalone GET
//! ```
//!
//! Every level implements [`Composable`]; composing never performs I/O. Use
//! [`DataverseClient::execute_batch`](crate::DataverseClient::execute_batch)
//! to send the result. Batch responses are not parsed.

mod action;
mod batch;
mod changeset;
mod composable;
pub mod mime;
mod payload;
mod request;


pub use action::Action;
pub use batch::{Batch, BatchItem};
pub use changeset::ChangeSet;
pub use composable::{ComposeContext, Composable};
pub use mime::{MimePart, Multipart};
pub use request::{ChangeRequest, ENTRY_CONTENT_TYPE, RetrieveRequest};
