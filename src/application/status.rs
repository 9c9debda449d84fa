//! The user's status line: read on mount, replaced on submit.

use tracing::{info, warn};

use crate::application::error::FeedError;
use crate::application::feed::FeedController;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusValue {
    value: String,
}

impl StatusValue {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn replace(&mut self, value: String) {
        self.value = value;
    }
}

impl FeedController {
    pub async fn refresh_status(&mut self) -> Result<(), FeedError> {
        let result = self.statuses.fetch_status().await;
        self.apply_status_fetch(result)
    }

    /// Replace the status. On success the displayed value becomes exactly
    /// `value`; on failure it is left as it was.
    pub async fn submit_status(&mut self, value: &str) -> Result<(), FeedError> {
        match self.statuses.update_status(value).await {
            Ok(_) => {
                info!(status = value, "Status updated");
                self.state.status.replace(value.to_string());
                Ok(())
            }
            Err(error) => {
                warn!(kind = error.kind(), error = %error, "Status update failed");
                self.state.record_error(error.clone());
                Err(error)
            }
        }
    }

    pub(crate) fn apply_status_fetch(
        &mut self,
        result: Result<String, FeedError>,
    ) -> Result<(), FeedError> {
        match result {
            Ok(value) => {
                self.state.status.replace(value);
                Ok(())
            }
            Err(error) => {
                warn!(kind = error.kind(), error = %error, "Status fetch failed");
                self.state.record_error(error.clone());
                Err(error)
            }
        }
    }
}
