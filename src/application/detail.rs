//! Single-post read path. Independent of the feed window.

use std::sync::Arc;

use tracing::error;

use crate::application::source::RemoteFeedSource;
use crate::domain::posts::{PostDetailView, PostId};

#[derive(Clone)]
pub struct ItemDetailReader {
    source: Arc<dyn RemoteFeedSource>,
    asset_base: String,
}

impl ItemDetailReader {
    pub fn new(source: Arc<dyn RemoteFeedSource>, asset_base: impl Into<String>) -> Self {
        Self {
            source,
            asset_base: asset_base.into(),
        }
    }

    /// Fetch one post for display. Failures are logged and yield the empty
    /// initial view; they are never surfaced to the viewer.
    pub async fn load(&self, id: &PostId) -> PostDetailView {
        match self.source.fetch_post(id).await {
            Ok(post) => PostDetailView::from_post(&post, &self.asset_base),
            Err(err) => {
                error!(post_id = %id, kind = err.kind(), error = %err, "Fetching post detail failed");
                PostDetailView::default()
            }
        }
    }
}
