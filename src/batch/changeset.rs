//! Atomic groups of change requests

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use super::composable::{ComposeContext, Composable};
use super::mime::{MimePart, Multipart};
use super::request::ChangeRequest;
use crate::errors::{DataverseError, Result};

/// Ordered change requests applied by the server as one all-or-nothing unit.
///
/// Insertion order is execution order. A changeset is built and consumed by
/// a single owner; mutation requires `&mut self`.
#[derive(Debug)]
pub struct ChangeSet {
    id: String,
    requests: Vec<ChangeRequest>,
}

impl Default for ChangeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeSet {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            requests: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// MIME boundary, `changeset_{id}`
    pub fn boundary(&self) -> String {
        format!("changeset_{}", self.id)
    }

    pub fn add(&mut self, request: ChangeRequest) {
        self.requests.push(request);
    }

    /// Append several requests; an empty input leaves the changeset untouched
    pub fn add_all<I>(&mut self, requests: I)
    where
        I: IntoIterator<Item = ChangeRequest>,
    {
        self.requests.extend(requests);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRequest> {
        self.requests.iter()
    }
}

impl Extend<ChangeRequest> for ChangeSet {
    fn extend<I: IntoIterator<Item = ChangeRequest>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeRequest;
    type IntoIter = std::slice::Iter<'a, ChangeRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Composable for ChangeSet {
    fn compose(&self, ctx: &ComposeContext<'_>) -> Result<MimePart> {
        // Content-IDs must be unique within a changeset.
        let mut seen = HashSet::with_capacity(self.requests.len());
        for request in &self.requests {
            if !seen.insert(request.id()) {
                return Err(DataverseError::InvalidBatch(format!(
                    "duplicate Content-ID '{}' in changeset {}",
                    request.id(),
                    self.id
                )));
            }
        }

        let mut multipart = Multipart::mixed(self.boundary());
        for request in &self.requests {
            multipart.push(request.compose(ctx)?);
        }

        debug!(changeset = %self.id, parts = multipart.len(), "Composed changeset");
        Ok(multipart.into_part())
    }
}
