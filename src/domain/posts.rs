//! Post entities as handed out by the remote feed store.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

/// Short US-style date used by the feed and the detail view (`3/7/2021`).
pub const DISPLAY_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

/// Opaque, server-assigned post identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub creator_name: String,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub image_url: String,
}

impl Post {
    pub fn display_date(&self) -> String {
        format_display_date(self.created_at)
    }
}

/// Fields sent with a create or update mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

/// An image file picked on the edit surface, ready for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// What the edit surface submits. The image is optional when editing: the
/// upload endpoint then keeps the previous asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image: Option<ImageFile>,
}

/// Display-ready detail of a single post. `Default` is the empty initial state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDetailView {
    pub title: String,
    pub author: String,
    pub date: String,
    pub image: String,
    pub content: String,
}

impl PostDetailView {
    /// Build the view, resolving the stored image path against `asset_base`.
    pub fn from_post(post: &Post, asset_base: &str) -> Self {
        Self {
            title: post.title.clone(),
            author: post.creator_name.clone(),
            date: post.display_date(),
            image: resolve_asset(asset_base, &post.image_url),
            content: post.content.clone(),
        }
    }
}

/// Format in the timestamp's own offset, so `...Z` payloads render their UTC
/// date. The viewer's local zone is not consulted: a post created late in the
/// evening west of UTC shows the next day.
pub fn format_display_date(at: OffsetDateTime) -> String {
    at.format(DISPLAY_DATE_FORMAT).unwrap_or_default()
}

fn resolve_asset(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> Post {
        Post {
            id: PostId::new("p1"),
            creator_name: "Ada".into(),
            title: "Hello".into(),
            content: "First post".into(),
            created_at: datetime!(2021-03-07 18:30 UTC),
            image_url: "images/a.png".into(),
        }
    }

    #[test]
    fn display_date_follows_timestamp_offset() {
        assert_eq!(
            format_display_date(datetime!(2021-03-07 23:30 -05:00)),
            "3/7/2021"
        );
        assert_eq!(
            format_display_date(datetime!(2021-03-07 23:30 -05:00).to_offset(time::UtcOffset::UTC)),
            "3/8/2021"
        );
    }

    #[test]
    fn display_date_uses_unpadded_month_and_day() {
        assert_eq!(sample().display_date(), "3/7/2021");
    }

    #[test]
    fn detail_view_resolves_image_against_base() {
        let view = PostDetailView::from_post(&sample(), "https://feed.example/");
        assert_eq!(view.image, "https://feed.example/images/a.png");
        assert_eq!(view.author, "Ada");
        assert_eq!(view.date, "3/7/2021");
    }

    #[test]
    fn post_input_serializes_camel_case() {
        let input = PostInput {
            title: "T".into(),
            content: "C".into(),
            image_url: "images/x.png".into(),
        };
        let value = serde_json::to_value(&input).expect("serialize input");
        assert_eq!(value["imageUrl"], "images/x.png");
    }
}
