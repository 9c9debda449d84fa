use async_trait::async_trait;
use serde_json::json;

use crate::application::error::FeedError;
use crate::application::source::StatusSource;

use super::GraphqlClient;
use super::documents::{FETCH_STATUS, UPDATE_STATUS};
use super::models::{GetStatusData, UpdateStatusData};

#[async_trait]
impl StatusSource for GraphqlClient {
    async fn fetch_status(&self) -> Result<String, FeedError> {
        let data: GetStatusData = self.execute(FETCH_STATUS, json!({})).await?;
        Ok(data.get_status.status)
    }

    async fn update_status(&self, status: &str) -> Result<String, FeedError> {
        let data: UpdateStatusData = self
            .execute(UPDATE_STATUS, json!({ "status": status }))
            .await?;
        Ok(data.update_status.status)
    }
}
