//! `$batch` execution

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use super::DataverseClient;
use super::response::ensure_success;
use crate::batch::{Batch, Composable};
use crate::errors::{DataverseError, Result};

const BATCH_PATH: &str = "$batch";

impl DataverseClient {
    /// Compose `batch` and POST it to the `$batch` endpoint.
    ///
    /// Only the outcome of the outer call is reported; per-request results in
    /// the multipart response are not parsed.
    pub async fn execute_batch(&self, batch: &Batch) -> Result<()> {
        if batch.is_empty() {
            return Err(DataverseError::InvalidBatch(format!(
                "batch {} has no items",
                batch.id()
            )));
        }

        let envelope = batch.compose(&self.compose_context())?;
        let content_type = envelope.content_type().unwrap_or_default().to_string();
        debug!(
            batch = %batch.id(),
            items = batch.len(),
            bytes = envelope.body().len(),
            "POST {}",
            BATCH_PATH
        );

        let response = self
            .http_client
            .post(self.url(BATCH_PATH))
            .header(CONTENT_TYPE, content_type)
            .body(envelope.body().clone())
            .send()
            .await?;

        ensure_success(response).await?;
        info!("Executed batch {} with {} items", batch.id(), batch.len());
        Ok(())
    }
}
