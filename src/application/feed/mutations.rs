use tracing::{debug, warn};

use super::FeedController;
use crate::application::error::FeedError;
use crate::application::reconcile::{MutationKind, MutationOutcome, Reconciliation, reconcile};
use crate::domain::posts::{Post, PostDraft, PostId, PostInput};
use crate::domain::window::LoadState;

impl FeedController {
    pub fn start_new_post(&mut self) {
        self.state.open_new_post();
    }

    /// Open the edit surface for a post in the current window.
    pub fn start_edit(&mut self, id: &PostId) -> bool {
        let opened = self.state.open_edit(id);
        if !opened {
            warn!(post_id = %id, "Cannot edit a post outside the current window");
        }
        opened
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    /// Fail the open draft before anything is sent, e.g. when its image
    /// cannot be read. Recorded like any other failed create or update.
    pub fn abort_edit(&mut self, error: FeedError) {
        let kind = self.edit_kind();
        reconcile(&mut self.state, MutationOutcome::Failed { kind, error });
    }

    /// Upload the draft's image, then create or update depending on whether
    /// an edit target is open. The edit surface closes either way.
    pub async fn finish_edit(&mut self, draft: PostDraft) -> Result<Reconciliation, FeedError> {
        let target = self.state.edit_mode().target().cloned();
        let kind = self.edit_kind();
        self.state.edit_loading = true;
        debug!(mutation = kind.as_str(), "Submitting post draft");

        match self.submit_draft(target.as_ref(), draft).await {
            Ok(post) => {
                let outcome = match kind {
                    MutationKind::Update => MutationOutcome::Updated(post),
                    _ => MutationOutcome::Created(post),
                };
                Ok(reconcile(&mut self.state, outcome))
            }
            Err(error) => {
                reconcile(
                    &mut self.state,
                    MutationOutcome::Failed {
                        kind,
                        error: error.clone(),
                    },
                );
                Err(error)
            }
        }
    }

    /// Delete a post and reload the current page from the server.
    pub async fn delete_post(&mut self, id: &PostId) -> Result<(), FeedError> {
        self.state.load = LoadState::Loading;

        match self.source.delete_post(id).await {
            Ok(()) => match reconcile(&mut self.state, MutationOutcome::Deleted(id.clone())) {
                Reconciliation::Refetch(ticket) => self.run_fetch(ticket).await,
                _ => Ok(()),
            },
            Err(error) => {
                reconcile(
                    &mut self.state,
                    MutationOutcome::Failed {
                        kind: MutationKind::Delete,
                        error: error.clone(),
                    },
                );
                Err(error)
            }
        }
    }

    fn edit_kind(&self) -> MutationKind {
        match self.state.edit_mode().target() {
            Some(_) => MutationKind::Update,
            None => MutationKind::Create,
        }
    }

    async fn submit_draft(
        &self,
        target: Option<&Post>,
        draft: PostDraft,
    ) -> Result<Post, FeedError> {
        let old_image = target.map(|post| post.image_url.as_str());
        let image_url = self
            .images
            .upload_image(draft.image.as_ref(), old_image)
            .await?;

        let input = PostInput {
            title: draft.title,
            content: draft.content,
            image_url,
        };

        match target {
            Some(post) => self.source.update_post(&post.id, &input).await,
            None => self.source.create_post(&input).await,
        }
    }
}
