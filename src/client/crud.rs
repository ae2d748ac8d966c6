//! Single-record create, update, upsert and delete

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};
use uuid::Uuid;

use super::DataverseClient;
use super::response::{ensure_success, entity_id};
use crate::codec::to_json_vec;
use crate::errors::Result;
use crate::metadata::{TableRow, collection_name, keyed_path};

const JSON: &str = "application/json";

impl DataverseClient {
    /// Create `row`, returning the id assigned by the service
    pub async fn create<T: TableRow>(&self, row: &T) -> Result<Uuid> {
        let collection = collection_name::<T>()?;
        let body = to_json_vec(row, &self.serializer_options)?;
        debug!("POST {} ({} bytes)", collection, body.len());

        let response = self
            .http_client
            .post(self.url(collection))
            .header(CONTENT_TYPE, JSON)
            .body(body)
            .send()
            .await?;

        let headers = response.headers().clone();
        ensure_success(response).await?;

        let id = entity_id(&headers)?;
        info!("Created {}({})", collection, id);
        Ok(id)
    }

    /// Update the columns present in `row`
    pub async fn update<T: TableRow>(&self, row: &T) -> Result<()> {
        let path = keyed_path(row)?;
        let body = to_json_vec(row, &self.serializer_options)?;
        debug!("PATCH {} ({} bytes)", path, body.len());

        let response = self
            .http_client
            .patch(self.url(&path))
            .header(CONTENT_TYPE, JSON)
            .body(body)
            .send()
            .await?;

        ensure_success(response).await?;
        info!("Updated {}", path);
        Ok(())
    }

    /// Update `row`, or create it under its own id if missing
    pub async fn upsert<T: TableRow>(&self, row: &T) -> Result<Uuid> {
        let path = keyed_path(row)?;
        let body = to_json_vec(row, &self.serializer_options)?;
        debug!("PATCH {} ({} bytes, upsert)", path, body.len());

        let response = self
            .http_client
            .patch(self.url(&path))
            .header(CONTENT_TYPE, JSON)
            .body(body)
            .send()
            .await?;

        let headers = response.headers().clone();
        ensure_success(response).await?;

        let id = entity_id(&headers)?;
        info!("Upserted {}", path);
        Ok(id)
    }

    pub async fn delete<T: TableRow>(&self, row: &T) -> Result<()> {
        let path = keyed_path(row)?;
        debug!("DELETE {}", path);

        let response = self.http_client.delete(self.url(&path)).send().await?;

        ensure_success(response).await?;
        info!("Deleted {}", path);
        Ok(())
    }
}
