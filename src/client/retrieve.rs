//! Single-record and paginated retrieval

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use super::DataverseClient;
use super::response::{Page, decode_checked};
use crate::errors::{DataverseError, Result};
use crate::metadata::{TableRow, collection_name, is_valid_collection_name};

impl DataverseClient {
    /// Retrieve one row by id.
    ///
    /// `options` is appended verbatim, e.g. `?$select=name`. A 404 yields
    /// `Ok(None)`.
    pub async fn retrieve<T: TableRow>(&self, id: Uuid, options: &str) -> Result<Option<T>> {
        let path = format!("{}({}){}", collection_name::<T>()?, id, options);
        debug!("GET {}", path);

        let response = self.http_client.get(self.url(&path)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("{} not found", path);
            return Ok(None);
        }

        decode_checked(response).await.map(Some)
    }

    /// Retrieve every row of `T`'s collection matching `options`, following
    /// continuation links until the last page
    pub async fn retrieve_all<T: TableRow>(&self, options: &str) -> Result<Vec<T>> {
        self.fetch_pages(collection_name::<T>()?, options).await
    }

    /// Untyped variant of [`retrieve_all`](Self::retrieve_all) addressing a
    /// collection by name
    pub async fn retrieve_all_from<T: DeserializeOwned>(
        &self,
        collection: &str,
        options: &str,
    ) -> Result<Vec<T>> {
        if !is_valid_collection_name(collection) {
            return Err(DataverseError::Config(format!(
                "Invalid collection name: {:?}",
                collection
            )));
        }
        self.fetch_pages(collection, options).await
    }

    async fn fetch_pages<T: DeserializeOwned>(&self, collection: &str, options: &str) -> Result<Vec<T>> {
        let limit = self.config.max_pages;

        let mut results = Vec::new();
        let mut next_url = Url::parse(&format!("{}{}", self.url(collection), options))?;
        let mut pages = 0usize;

        loop {
            if pages == limit {
                warn!("Stopping retrieval of {} after {} pages", collection, limit);
                return Err(DataverseError::PageLimitExceeded { limit });
            }

            debug!("GET {} (page {})", next_url, pages + 1);
            let response = self.http_client.get(next_url.clone()).send().await?;
            let page: Page<T> = decode_checked(response).await?;
            pages += 1;
            results.extend(page.results);

            match page.next_link {
                Some(link) => next_url = continuation_url(&self.service_root, &link)?,
                None => break,
            }
        }

        info!("Retrieved {} rows of {} in {} pages", results.len(), collection, pages);
        Ok(results)
    }
}

/// Request URL for a continuation link.
///
/// Relative links are resolved against the service root. Links on any other
/// origin are rejected, since every request carries the bearer token.
fn continuation_url(service_root: &Url, link: &str) -> Result<Url> {
    let url = service_root.join(link)?;

    if url.origin() != service_root.origin() {
        warn!("Refusing continuation link outside {}: {}", service_root, url);
        return Err(DataverseError::InvalidResponse(format!(
            "continuation link points outside the service root: {}",
            url
        )));
    }
    Ok(url)
}
