use async_trait::async_trait;
use serde_json::json;

use crate::application::error::FeedError;
use crate::application::source::{FeedPage, RemoteFeedSource};
use crate::domain::posts::{Post, PostId, PostInput};

use super::GraphqlClient;
use super::documents::{CREATE_POST, DELETE_POST, FETCH_POST, FETCH_POSTS, UPDATE_POST};
use super::models::{CreatePostData, DeletePostData, GetPostData, GetPostsData, UpdatePostData};

#[async_trait]
impl RemoteFeedSource for GraphqlClient {
    async fn fetch_page(&self, page: i32) -> Result<FeedPage, FeedError> {
        let data: GetPostsData = self.execute(FETCH_POSTS, json!({ "page": page })).await?;
        let posts = data.get_posts.posts.into_iter().map(Post::from).collect();
        Ok(FeedPage::new(posts, data.get_posts.total_items))
    }

    async fn fetch_post(&self, id: &PostId) -> Result<Post, FeedError> {
        let data: GetPostData = self
            .execute(FETCH_POST, json!({ "postId": id.as_str() }))
            .await?;
        Ok(data.get_post.into())
    }

    async fn create_post(&self, input: &PostInput) -> Result<Post, FeedError> {
        let variables = serde_json::to_value(input)
            .map_err(|e| FeedError::invalid_input(format!("unencodable post input: {e}")))?;
        let data: CreatePostData = self.execute(CREATE_POST, variables).await?;
        Ok(data.create_post.into())
    }

    async fn update_post(&self, id: &PostId, input: &PostInput) -> Result<Post, FeedError> {
        let variables = json!({
            "postId": id.as_str(),
            "title": input.title,
            "content": input.content,
            "imageUrl": input.image_url,
        });
        let data: UpdatePostData = self.execute(UPDATE_POST, variables).await?;
        Ok(data.update_post.into())
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), FeedError> {
        let data: DeletePostData = self
            .execute(DELETE_POST, json!({ "postId": id.as_str() }))
            .await?;
        match data.delete_post {
            Some(false) => Err(FeedError::Mutation(format!("server declined to delete {id}"))),
            _ => Ok(()),
        }
    }
}
