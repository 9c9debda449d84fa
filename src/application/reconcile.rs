//! Applies mutation outcomes to the local window.
//!
//! Creates and updates patch the cache in place; a delete always goes back to
//! the server for the current page. After a create the window shows the newest
//! post but is no longer an exact copy of the server page: later pages shift by
//! one on the server and that is not re-derived locally.

use metrics::counter;
use tracing::{info, warn};

use crate::application::error::FeedError;
use crate::application::state::{FeedState, FetchTicket};
use crate::domain::posts::{Post, PostId};
use crate::domain::window::LoadState;

pub(crate) const METRIC_MUTATION_FAILED: &str = "postfeed_mutation_failed_total";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Created(Post),
    Updated(Post),
    Deleted(PostId),
    Failed { kind: MutationKind, error: FeedError },
}

/// How the window was brought up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// New post placed at the front; `evicted` when the last entry was dropped.
    Prepended { evicted: bool },
    Replaced,
    /// Updated post was not in the window; nothing changed.
    Unmatched,
    /// The caller must fetch `ticket` and hand the result to `complete_fetch`.
    Refetch(FetchTicket),
    Rejected,
}

pub fn reconcile(state: &mut FeedState, outcome: MutationOutcome) -> Reconciliation {
    match outcome {
        MutationOutcome::Created(post) => {
            let id = post.id.clone();
            state.window.increment_total();
            let evicted = state.cache.prepend(post).is_some();
            state.close_edit();
            info!(post_id = %id, evicted, total_items = state.window.total_items(), "Post created");
            Reconciliation::Prepended { evicted }
        }
        MutationOutcome::Updated(post) => {
            let id = post.id.clone();
            let replaced = state.cache.replace_matching(post);
            state.close_edit();
            if replaced {
                info!(post_id = %id, "Post updated");
                Reconciliation::Replaced
            } else {
                warn!(post_id = %id, "Updated post is not in the current window");
                Reconciliation::Unmatched
            }
        }
        MutationOutcome::Deleted(id) => {
            info!(post_id = %id, page = state.window.page_index(), "Post deleted; refetching page");
            Reconciliation::Refetch(state.begin_refetch())
        }
        MutationOutcome::Failed { kind, error } => {
            warn!(
                mutation = kind.as_str(),
                kind = error.kind(),
                error = %error,
                "Post mutation failed"
            );
            counter!(METRIC_MUTATION_FAILED, "mutation" => kind.as_str()).increment(1);
            match kind {
                MutationKind::Create | MutationKind::Update => state.close_edit(),
                MutationKind::Delete => {
                    if state.load == LoadState::Loading {
                        state.load = LoadState::Loaded;
                    }
                }
            }
            state.record_error(error);
            Reconciliation::Rejected
        }
    }
}
