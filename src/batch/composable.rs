//! Uniform composition of batch building blocks into MIME content

use url::Url;

use super::mime::MimePart;
use crate::codec::SerializerOptions;
use crate::errors::Result;

/// Connection details needed to render sub-requests
#[derive(Debug, Clone, Copy)]
pub struct ComposeContext<'a> {
    /// Absolute service root, ending in `/`
    pub service_root: &'a Url,
    pub options: &'a SerializerOptions,
}

impl<'a> ComposeContext<'a> {
    pub fn new(service_root: &'a Url, options: &'a SerializerOptions) -> Self {
        Self {
            service_root,
            options,
        }
    }

    /// Absolute URL of a path relative to the service root
    pub fn absolute(&self, relative: &str) -> String {
        format!("{}{}", self.service_root, relative)
    }
}

/// Anything that renders to a MIME part of a batch payload.
///
/// Composition is a pure transformation; nothing is sent.
pub trait Composable {
    fn compose(&self, ctx: &ComposeContext<'_>) -> Result<MimePart>;
}
