//! Wire shapes of GraphQL requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::domain::posts::{Post, PostId};

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlErrorEntry>>,
}

/// One entry of the `errors` array. Servers put the status-like code either
/// at the top level or under `extensions`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlErrorEntry {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub status: Option<Value>,
}

impl GraphqlErrorEntry {
    /// Numeric code from `status` or `extensions.status`. Codes sent as
    /// strings are accepted; anything non-numeric counts as absent.
    pub fn status_code(&self) -> Option<u64> {
        self.status
            .as_ref()
            .and_then(numeric_code)
            .or_else(|| {
                self.extensions
                    .as_ref()
                    .and_then(|ext| ext.status.as_ref())
                    .and_then(numeric_code)
            })
    }
}

fn numeric_code(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatorNode {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNode {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub creator: CreatorNode,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub image_url: String,
}

impl From<PostNode> for Post {
    fn from(node: PostNode) -> Self {
        Post {
            id: node.id,
            creator_name: node.creator.name,
            title: node.title,
            content: node.content,
            created_at: node.created_at,
            image_url: node.image_url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub posts: Vec<PostNode>,
    pub total_items: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPostsData {
    pub get_posts: PostsPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPostData {
    pub get_post: PostNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostData {
    pub create_post: PostNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostData {
    pub update_post: PostNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostData {
    #[serde(default)]
    pub delete_post: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct StatusNode {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetStatusData {
    pub get_status: StatusNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusData {
    pub update_status: StatusNode,
}
