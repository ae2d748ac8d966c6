//! Outermost `$batch` envelope

use tracing::debug;
use uuid::Uuid;

use super::changeset::ChangeSet;
use super::composable::{ComposeContext, Composable};
use super::mime::{MimePart, Multipart};
use super::request::{ChangeRequest, RetrieveRequest};
use crate::client::DataverseClient;
use crate::errors::Result;

/// Entry of a batch
#[derive(Debug)]
pub enum BatchItem {
    /// Change executed on its own, outside any changeset
    Request(ChangeRequest),
    /// Atomic group of changes
    ChangeSet(ChangeSet),
    /// Read executed on its own
    Query(RetrieveRequest),
}

impl From<ChangeRequest> for BatchItem {
    fn from(request: ChangeRequest) -> Self {
        BatchItem::Request(request)
    }
}

impl From<ChangeSet> for BatchItem {
    fn from(changeset: ChangeSet) -> Self {
        BatchItem::ChangeSet(changeset)
    }
}

impl From<RetrieveRequest> for BatchItem {
    fn from(request: RetrieveRequest) -> Self {
        BatchItem::Query(request)
    }
}

impl Composable for BatchItem {
    fn compose(&self, ctx: &ComposeContext<'_>) -> Result<MimePart> {
        match self {
            BatchItem::Request(request) => request.compose(ctx),
            BatchItem::ChangeSet(changeset) => changeset.compose(ctx),
            BatchItem::Query(query) => query.compose(ctx),
        }
    }
}

/// Changesets and standalone requests sent as a single HTTP call.
///
/// Items execute in insertion order. Concurrent mutation is ruled out by
/// `&mut self`; share a batch across tasks only after it is fully built.
#[derive(Debug)]
pub struct Batch {
    id: String,
    items: Vec<BatchItem>,
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}

impl Batch {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            items: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// MIME boundary, `batch_{id}`
    pub fn boundary(&self) -> String {
        format!("batch_{}", self.id)
    }

    pub fn add(&mut self, item: impl Into<BatchItem>) {
        self.items.push(item.into());
    }

    /// Append several items; an empty input leaves the batch untouched
    pub fn add_all<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<BatchItem>,
    {
        self.items.extend(items.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchItem> {
        self.items.iter()
    }

    /// Compose using the connection and serializer settings of `client`
    pub fn compose_with(&self, client: &DataverseClient) -> Result<MimePart> {
        self.compose(&client.compose_context())
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a BatchItem;
    type IntoIter = std::slice::Iter<'a, BatchItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Composable for Batch {
    fn compose(&self, ctx: &ComposeContext<'_>) -> Result<MimePart> {
        let mut multipart = Multipart::mixed(self.boundary());
        for item in &self.items {
            multipart.push(item.compose(ctx)?);
        }

        debug!(batch = %self.id, parts = multipart.len(), "Composed batch");
        Ok(multipart.into_part())
    }
}
