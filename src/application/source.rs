//! Traits describing the remote collaborators the feed engine consumes.
//!
//! Every call is single-shot: implementations never retry and resolve exactly
//! once with either the full result or an error.

use async_trait::async_trait;

use crate::application::error::FeedError;
use crate::domain::posts::{ImageFile, Post, PostId, PostInput};

/// One page of the remote feed together with the authoritative total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub total_items: u64,
}

impl FeedPage {
    pub fn new(posts: Vec<Post>, total_items: u64) -> Self {
        Self { posts, total_items }
    }
}

#[async_trait]
pub trait RemoteFeedSource: Send + Sync {
    async fn fetch_page(&self, page: i32) -> Result<FeedPage, FeedError>;

    async fn fetch_post(&self, id: &PostId) -> Result<Post, FeedError>;

    async fn create_post(&self, input: &PostInput) -> Result<Post, FeedError>;

    async fn update_post(&self, id: &PostId, input: &PostInput) -> Result<Post, FeedError>;

    async fn delete_post(&self, id: &PostId) -> Result<(), FeedError>;
}

/// Upload endpoint that must be called before a create or update mutation.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload `image`, replacing `old_image` when given, and return the
    /// storage path to reference from the mutation.
    async fn upload_image(
        &self,
        image: Option<&ImageFile>,
        old_image: Option<&str>,
    ) -> Result<String, FeedError>;
}

#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<String, FeedError>;

    async fn update_status(&self, status: &str) -> Result<String, FeedError>;
}
