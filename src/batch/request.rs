//! Individual sub-requests of a batch

use std::fmt;

use bytes::{BufMut, BytesMut};
use reqwest::Method;
use uuid::Uuid;

use super::action::Action;
use super::composable::{ComposeContext, Composable};
use super::mime::{CONTENT_ID, CONTENT_TRANSFER_ENCODING, CONTENT_TYPE, CRLF, MimePart};
use super::payload::RowPayload;
use crate::errors::{DataverseError, Result};
use crate::metadata::{self, TableRow};

/// Content type of the JSON entity carried by a change request
pub const ENTRY_CONTENT_TYPE: &str = "application/json;type=entry";

/// One row-level operation, rendered as an `application/http` part
pub struct ChangeRequest {
    id: String,
    action: Action,
    row: Box<dyn RowPayload>,
}

impl ChangeRequest {
    /// Wrap `row` with a random correlation id
    pub fn new<T: TableRow + 'static>(row: T, action: Action) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action,
            row: Box::new(row),
        }
    }

    pub fn create<T: TableRow + 'static>(row: T) -> Self {
        Self::new(row, Action::Create)
    }

    pub fn update<T: TableRow + 'static>(row: T) -> Self {
        Self::new(row, Action::Update)
    }

    pub fn upsert<T: TableRow + 'static>(row: T) -> Self {
        Self::new(row, Action::Upsert)
    }

    pub fn delete<T: TableRow + 'static>(row: T) -> Self {
        Self::new(row, Action::Delete)
    }

    /// Replace the correlation id sent as `Content-ID`
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Method and service-root-relative path of this request
    pub fn resolve(&self) -> Result<(Method, String)> {
        self.action.resolve_payload(self.row.as_ref())
    }
}

impl fmt::Debug for ChangeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeRequest")
            .field("id", &self.id)
            .field("action", &self.action)
            .field("row", &self.row.type_name())
            .finish()
    }
}

impl Composable for ChangeRequest {
    fn compose(&self, ctx: &ComposeContext<'_>) -> Result<MimePart> {
        let (method, path) = self.resolve()?;
        let body = self.row.to_json(ctx.options)?;

        let message = http_message(
            &method,
            &ctx.absolute(&path),
            &[(CONTENT_TYPE, ENTRY_CONTENT_TYPE)],
            &body,
        );

        Ok(application_http(message).with_header(CONTENT_ID, self.id.clone()))
    }
}

/// Standalone read placed directly in a batch, outside any changeset
#[derive(Debug, Clone)]
pub struct RetrieveRequest {
    type_name: &'static str,
    collection: &'static str,
    id: Option<Uuid>,
    options: String,
}

impl RetrieveRequest {
    /// Query the collection of `T`, e.g. with `?$select=name&$top=10`
    pub fn collection<T: TableRow>(options: impl Into<String>) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            collection: T::logical_collection_name(),
            id: None,
            options: options.into(),
        }
    }

    /// Read a single row of `T`
    pub fn row<T: TableRow>(id: Uuid, options: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::collection::<T>(options)
        }
    }

    /// Path relative to the service root
    pub fn path(&self) -> Result<String> {
        if !metadata::is_valid_collection_name(self.collection) {
            return Err(DataverseError::MissingMetadata {
                type_name: self.type_name,
                attribute: "logical collection name",
            });
        }

        Ok(match self.id {
            Some(id) => format!("{}({}){}", self.collection, id, self.options),
            None => format!("{}{}", self.collection, self.options),
        })
    }
}

impl Composable for RetrieveRequest {
    fn compose(&self, ctx: &ComposeContext<'_>) -> Result<MimePart> {
        let message = http_message(
            &Method::GET,
            &ctx.absolute(&self.path()?),
            &[("Accept", "application/json")],
            &[],
        );

        Ok(application_http(message))
    }
}

fn application_http(message: BytesMut) -> MimePart {
    MimePart::new(message.freeze())
        .with_header(CONTENT_TYPE, "application/http")
        .with_header(CONTENT_TRANSFER_ENCODING, "binary")
}

// Request line, headers, blank line, body.
fn http_message(method: &Method, url: &str, headers: &[(&str, &str)], body: &[u8]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(url.len() + body.len() + 96);

    buf.put_slice(method.as_str().as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(url.as_bytes());
    buf.put_slice(b" HTTP/1.1");
    buf.put_slice(CRLF.as_bytes());

    for (name, value) in headers {
        buf.put_slice(name.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(value.as_bytes());
        buf.put_slice(CRLF.as_bytes());
    }

    buf.put_slice(CRLF.as_bytes());
    buf.put_slice(body);
    buf
}
