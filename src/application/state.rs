//! Session state owned by the feed controller and the page-fetch protocol.
//!
//! Fetching is split in two synchronous halves around the remote call:
//! `begin_*` moves the window and hands out a [`FetchTicket`], and
//! [`FeedState::complete_fetch`] applies the response. Each ticket carries a
//! generation; only the newest ticket may touch the window, so a slow response
//! for a page the user already left is dropped instead of overwriting newer
//! state.

use metrics::counter;
use tracing::{debug, info};

use crate::application::error::{ErrorSlot, FeedError};
use crate::application::source::FeedPage;
use crate::application::status::StatusValue;
use crate::domain::posts::{Post, PostId};
use crate::domain::window::{LoadState, LocalCache, PageWindow};

pub(crate) const METRIC_FETCH_TOTAL: &str = "postfeed_fetch_total";
pub(crate) const METRIC_FETCH_STALE_DROPPED: &str = "postfeed_fetch_stale_dropped_total";

/// Handle for one in-flight page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    page: i32,
    generation: u64,
}

impl FetchTicket {
    pub fn page(&self) -> i32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`FeedState::complete_fetch`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    Replaced,
    Failed,
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Closed,
    Creating,
    Editing(Post),
}

impl EditMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditMode::Closed)
    }

    pub fn target(&self) -> Option<&Post> {
        match self {
            EditMode::Editing(post) => Some(post),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct FeedState {
    pub(crate) window: PageWindow,
    pub(crate) cache: LocalCache,
    pub(crate) load: LoadState,
    pub(crate) edit: EditMode,
    pub(crate) edit_loading: bool,
    pub(crate) status: StatusValue,
    pub(crate) error: ErrorSlot,
    generation: u64,
}

impl FeedState {
    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    pub fn posts(&self) -> &[Post] {
        self.cache.posts()
    }

    pub fn page_index(&self) -> i32 {
        self.window.page_index()
    }

    pub fn total_items(&self) -> u64 {
        self.window.total_items()
    }

    pub fn last_page(&self) -> u64 {
        self.window.last_page()
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn edit_mode(&self) -> &EditMode {
        &self.edit
    }

    pub fn edit_loading(&self) -> bool {
        self.edit_loading
    }

    pub fn status(&self) -> &StatusValue {
        &self.status
    }

    pub fn error(&self) -> &ErrorSlot {
        &self.error
    }

    pub fn dismiss_error(&mut self) -> Option<FeedError> {
        self.error.dismiss()
    }

    /// Mount: back to page 1 and fetch it.
    pub fn begin_initial(&mut self) -> FetchTicket {
        self.window.reset();
        self.issue_fetch()
    }

    pub fn begin_next(&mut self) -> FetchTicket {
        self.window.advance();
        self.cache.clear();
        self.issue_fetch()
    }

    pub fn begin_previous(&mut self) -> FetchTicket {
        self.window.retreat();
        self.cache.clear();
        self.issue_fetch()
    }

    /// Refetch the current page without moving the window.
    pub fn begin_refetch(&mut self) -> FetchTicket {
        self.issue_fetch()
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<FeedPage, FeedError>,
    ) -> FetchApplied {
        if ticket.generation != self.generation {
            debug!(
                page = ticket.page,
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale page response"
            );
            counter!(METRIC_FETCH_STALE_DROPPED).increment(1);
            return FetchApplied::Stale;
        }

        match result {
            Ok(page) => {
                info!(
                    page = ticket.page,
                    received = page.posts.len(),
                    total_items = page.total_items,
                    "Feed page loaded"
                );
                counter!(METRIC_FETCH_TOTAL, "result" => "ok").increment(1);
                self.cache.replace_all(page.posts);
                self.window.set_total(page.total_items);
                self.load = LoadState::Loaded;
                FetchApplied::Replaced
            }
            Err(error) => {
                tracing::error!(
                    page = ticket.page,
                    kind = error.kind(),
                    error = %error,
                    "Feed page fetch failed"
                );
                counter!(METRIC_FETCH_TOTAL, "result" => "error").increment(1);
                self.load = LoadState::Error;
                self.error.set(error);
                FetchApplied::Failed
            }
        }
    }

    pub fn open_new_post(&mut self) {
        self.edit = EditMode::Creating;
    }

    /// Open the edit surface on a snapshot of a cached post. Unknown ids leave
    /// the surface closed.
    pub fn open_edit(&mut self, id: &PostId) -> bool {
        match self.cache.find(id) {
            Some(post) => {
                self.edit = EditMode::Editing(post.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditMode::Closed;
    }

    pub(crate) fn close_edit(&mut self) {
        self.edit = EditMode::Closed;
        self.edit_loading = false;
    }

    pub(crate) fn record_error(&mut self, error: FeedError) {
        self.error.set(error);
    }

    fn issue_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load = LoadState::Loading;
        FetchTicket {
            page: self.window.page_index(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn post(id: &str) -> Post {
        Post {
            id: PostId::new(id),
            creator_name: "author".into(),
            title: id.to_uppercase(),
            content: String::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            image_url: String::new(),
        }
    }

    fn loaded(posts: &[&str], total: u64) -> FeedState {
        let mut state = FeedState::default();
        let ticket = state.begin_initial();
        let page = FeedPage::new(posts.iter().map(|id| post(id)).collect(), total);
        assert_eq!(state.complete_fetch(ticket, Ok(page)), FetchApplied::Replaced);
        state
    }

    #[test]
    fn initial_fetch_targets_page_one() {
        let mut state = FeedState::default();
        let ticket = state.begin_initial();
        assert_eq!(ticket.page(), 1);
        assert!(state.is_loading());
    }

    #[test]
    fn next_clears_cache_and_moves_window() {
        let mut state = loaded(&["a", "b"], 5);
        let ticket = state.begin_next();

        assert_eq!(ticket.page(), 2);
        assert!(state.posts().is_empty());
        assert_eq!(state.load_state(), LoadState::Loading);
    }

    #[test]
    fn previous_from_first_page_is_not_clamped() {
        let mut state = loaded(&["a"], 1);
        let ticket = state.begin_previous();
        assert_eq!(ticket.page(), 0);
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn fetched_page_replaces_cache_and_total() {
        let state = loaded(&["a", "b"], 7);
        assert_eq!(state.posts().len(), 2);
        assert_eq!(state.total_items(), 7);
        assert_eq!(state.last_page(), 4);
        assert_eq!(state.load_state(), LoadState::Loaded);
    }

    #[test]
    fn failed_fetch_populates_error_slot() {
        let mut state = loaded(&["a"], 1);
        let ticket = state.begin_next();
        let applied = state.complete_fetch(ticket, Err(FeedError::network("offline")));

        assert_eq!(applied, FetchApplied::Failed);
        assert_eq!(state.load_state(), LoadState::Error);
        assert!(matches!(state.error().current(), Some(FeedError::Network(_))));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = loaded(&["a", "b"], 6);
        let slow = state.begin_next();
        let fast = state.begin_next();

        let newest = FeedPage::new(vec![post("e"), post("f")], 6);
        assert_eq!(state.complete_fetch(fast, Ok(newest)), FetchApplied::Replaced);

        let outdated = FeedPage::new(vec![post("c"), post("d")], 6);
        assert_eq!(state.complete_fetch(slow, Ok(outdated)), FetchApplied::Stale);

        let ids: Vec<_> = state.posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["e", "f"]);
        assert_eq!(state.page_index(), 3);
    }

    #[test]
    fn stale_error_does_not_touch_error_slot() {
        let mut state = loaded(&["a"], 3);
        let slow = state.begin_next();
        let _fast = state.begin_previous();

        state.complete_fetch(slow, Err(FeedError::network("late")));
        assert!(!state.error().is_set());
        assert!(state.is_loading());
    }

    #[test]
    fn open_edit_requires_cached_post() {
        let mut state = loaded(&["a", "b"], 2);
        assert!(!state.open_edit(&PostId::new("zzz")));
        assert!(!state.edit_mode().is_open());

        assert!(state.open_edit(&PostId::new("b")));
        assert_eq!(
            state.edit_mode().target().map(|p| p.id.as_str()),
            Some("b")
        );
    }
}
