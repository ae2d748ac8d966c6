//! Response decoding helpers

use reqwest::header::LOCATION;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{DataverseError, Result};

const ODATA_ENTITY_ID: &str = "OData-EntityId";

/// One page of a collection query
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "value", default = "Vec::new")]
    pub results: Vec<T>,
    /// Continuation link, absent on the last page
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

/// Read the body of `response`, mapping a non-success status to a remote error
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<bytes::Bytes> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(DataverseError::remote(status, &String::from_utf8_lossy(&body)));
    }
    Ok(body)
}

/// Decode a body whose status is checked only after decoding was attempted.
///
/// A non-success status always yields a remote error, whether or not the body
/// decoded; a success with an undecodable body yields the decode error.
pub(crate) async fn decode_checked<T>(response: reqwest::Response) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    let body = response.bytes().await?;
    let decoded = serde_json::from_slice::<T>(&body);

    if !status.is_success() {
        return Err(DataverseError::remote(status, &String::from_utf8_lossy(&body)));
    }
    Ok(decoded?)
}

/// Identifier of the row addressed by `OData-EntityId`, or `Location` if absent
pub(crate) fn entity_id(headers: &reqwest::header::HeaderMap) -> Result<Uuid> {
    let link = headers
        .get(ODATA_ENTITY_ID)
        .or_else(|| headers.get(LOCATION))
        .ok_or_else(|| {
            DataverseError::InvalidResponse("no OData-EntityId or Location header".to_string())
        })?
        .to_str()
        .map_err(|e| DataverseError::InvalidResponse(format!("unreadable entity link: {}", e)))?;

    id_from_link(link)
}

/// Parse the key between the last `(` and the following `)`
pub(crate) fn id_from_link(link: &str) -> Result<Uuid> {
    let invalid = || DataverseError::InvalidResponse(format!("no row id in entity link: {}", link));

    let start = link.rfind('(').ok_or_else(invalid)? + 1;
    let len = link[start..].find(')').ok_or_else(invalid)?;
    Uuid::parse_str(&link[start..start + len]).map_err(|_| invalid())
}
