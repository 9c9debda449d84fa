//! Page window and the bounded local cache of displayed posts.

use tracing::warn;

use crate::domain::posts::{Post, PostId};

/// Fixed number of posts per page. There is no runtime override.
pub const PAGE_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Current page index plus the authoritative total item count.
///
/// The index is not clamped: stepping back from page 1 yields page 0 and it
/// is up to the caller to hide that affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    page_index: i32,
    page_size: usize,
    total_items: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page_index: 1,
            page_size: PAGE_SIZE,
            total_items: 0,
        }
    }
}

impl PageWindow {
    pub fn page_index(&self) -> i32 {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Advisory last page, `ceil(total_items / page_size)`.
    pub fn last_page(&self) -> u64 {
        self.total_items.div_ceil(self.page_size as u64)
    }

    pub(crate) fn reset(&mut self) {
        self.page_index = 1;
    }

    pub(crate) fn advance(&mut self) {
        self.page_index = self.page_index.saturating_add(1);
    }

    pub(crate) fn retreat(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub(crate) fn set_total(&mut self, total_items: u64) {
        self.total_items = total_items;
    }

    pub(crate) fn increment_total(&mut self) {
        self.total_items = self.total_items.saturating_add(1);
    }
}

/// Ordered posts currently on screen, never longer than its capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCache {
    posts: Vec<Post>,
    capacity: usize,
}

impl Default for LocalCache {
    fn default() -> Self {
        Self::with_capacity(PAGE_SIZE)
    }
}

impl LocalCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            posts: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|post| &post.id == id)
    }

    pub(crate) fn clear(&mut self) {
        self.posts.clear();
    }

    /// Wholesale replacement with a fetched page. Extra items beyond the
    /// capacity are dropped so the length bound holds.
    pub(crate) fn replace_all(&mut self, mut posts: Vec<Post>) {
        if posts.len() > self.capacity {
            warn!(
                received = posts.len(),
                capacity = self.capacity,
                "Fetched page exceeds window capacity; truncating"
            );
            posts.truncate(self.capacity);
        }
        self.posts = posts;
    }

    /// Put `post` at the front, evicting the last entry when over capacity.
    pub(crate) fn prepend(&mut self, post: Post) -> Option<Post> {
        self.posts.insert(0, post);
        if self.posts.len() > self.capacity {
            self.posts.pop()
        } else {
            None
        }
    }

    /// Replace the entry with the same id in place. Returns `false` and leaves
    /// the cache untouched when no entry matches.
    pub(crate) fn replace_matching(&mut self, post: Post) -> bool {
        match self.posts.iter().position(|existing| existing.id == post.id) {
            Some(index) => {
                self.posts[index] = post;
                true
            }
            None => false,
        }
    }
}
