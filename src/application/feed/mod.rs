//! Feed controller: the one owner of the session state.
//!
//! Methods take `&mut self`, so every continuation runs to completion before
//! the next one can touch the window. Errors are written to the shared error
//! slot and also returned so callers can branch on them.

mod mutations;

use std::sync::Arc;

use crate::application::error::FeedError;
use crate::application::source::{ImageStore, RemoteFeedSource, StatusSource};
use crate::application::state::{FeedState, FetchApplied, FetchTicket};

pub struct FeedController {
    pub(crate) source: Arc<dyn RemoteFeedSource>,
    pub(crate) images: Arc<dyn ImageStore>,
    pub(crate) statuses: Arc<dyn StatusSource>,
    pub(crate) state: FeedState,
}

impl FeedController {
    pub fn new(
        source: Arc<dyn RemoteFeedSource>,
        images: Arc<dyn ImageStore>,
        statuses: Arc<dyn StatusSource>,
    ) -> Self {
        Self {
            source,
            images,
            statuses,
            state: FeedState::default(),
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn page_index(&self) -> i32 {
        self.state.page_index()
    }

    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    pub fn last_page(&self) -> u64 {
        self.state.last_page()
    }

    pub fn dismiss_error(&mut self) -> Option<FeedError> {
        self.state.dismiss_error()
    }

    /// Read the status value and load page 1, both requests in flight at once.
    pub async fn mount(&mut self) -> Result<(), FeedError> {
        let ticket = self.state.begin_initial();
        let (status, page) = tokio::join!(
            self.statuses.fetch_status(),
            self.source.fetch_page(ticket.page())
        );

        let status_result = self.apply_status_fetch(status);
        let page_failure = page.as_ref().err().cloned();
        let page_result = match (self.state.complete_fetch(ticket, page), page_failure) {
            (FetchApplied::Failed, Some(error)) => Err(error),
            _ => Ok(()),
        };

        page_result.and(status_result)
    }

    pub async fn load_initial(&mut self) -> Result<(), FeedError> {
        let ticket = self.state.begin_initial();
        self.run_fetch(ticket).await
    }

    pub async fn go_next(&mut self) -> Result<(), FeedError> {
        let ticket = self.state.begin_next();
        self.run_fetch(ticket).await
    }

    pub async fn go_previous(&mut self) -> Result<(), FeedError> {
        let ticket = self.state.begin_previous();
        self.run_fetch(ticket).await
    }

    pub(crate) async fn run_fetch(&mut self, ticket: FetchTicket) -> Result<(), FeedError> {
        let result = self.source.fetch_page(ticket.page()).await;
        let failure = result.as_ref().err().cloned();
        match (self.state.complete_fetch(ticket, result), failure) {
            (FetchApplied::Failed, Some(error)) => Err(error),
            _ => Ok(()),
        }
    }
}
