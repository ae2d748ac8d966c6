//! Minimal MIME writer for `multipart/mixed` batch payloads
//!
//! Parts are written as `--boundary CRLF headers CRLF CRLF body CRLF`, closed by
//! `--boundary-- CRLF`. Header order is preserved; setting a header that is
//! already present replaces its value in place.

use bytes::{BufMut, Bytes, BytesMut};

pub const CRLF: &str = "\r\n";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_ID: &str = "Content-ID";
pub const CONTENT_TRANSFER_ENCODING: &str = "Content-Transfer-Encoding";

/// One MIME entity: ordered headers plus a raw body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MimePart {
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl MimePart {
    /// Create a part with no headers
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Builder form of [`set_header`](Self::set_header)
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set a header, overwriting any existing value of the same name
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Write headers, blank line and body
    pub fn write_to(&self, buf: &mut BytesMut) {
        for (name, value) in &self.headers {
            buf.put_slice(name.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(value.as_bytes());
            buf.put_slice(CRLF.as_bytes());
        }
        buf.put_slice(CRLF.as_bytes());
        buf.put_slice(&self.body);
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.body.len() + 128);
        self.write_to(&mut buf);
        buf.freeze()
    }
}

/// A `multipart/mixed` body under construction
#[derive(Debug, Clone)]
pub struct Multipart {
    boundary: String,
    parts: Vec<MimePart>,
}

impl Multipart {
    pub fn mixed(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn push(&mut self, part: MimePart) {
        self.parts.push(part);
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Full `Content-Type` value carrying the boundary parameter
    pub fn content_type(&self) -> String {
        format!("multipart/mixed;boundary={}", self.boundary)
    }

    /// Encode the parts between boundary delimiters
    pub fn encode(&self) -> Bytes {
        let capacity = self.parts.iter().map(|p| p.body.len() + 256).sum::<usize>() + 64;
        let mut buf = BytesMut::with_capacity(capacity);

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(CRLF.as_bytes());
            part.write_to(&mut buf);
            buf.put_slice(CRLF.as_bytes());
        }

        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--");
        buf.put_slice(CRLF.as_bytes());
        buf.freeze()
    }

    /// Wrap the encoded body as a part whose content type names the boundary
    pub fn into_part(self) -> MimePart {
        let content_type = self.content_type();
        MimePart::new(self.encode()).with_header(CONTENT_TYPE, content_type)
    }
}
