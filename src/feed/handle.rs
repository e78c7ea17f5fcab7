use super::{ActionKind, FeedStore};
use crate::gateway::FeedApi;
use crate::session::SessionAccessor;
use crate::Error;
use std::sync::Arc;
use tracing::warn;

/// What became of a triggered mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation ran and its result is in the store.
    Applied,
    /// A duplicate trigger or a cancelled confirmation; nothing
    /// was sent and nothing changed.
    Skipped,
}

/// The answer of the delete-post confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// Executes user-triggered mutations against the store.
///
/// Every mutation re-validates the session immediately before
/// dispatch and holds at most one in-flight instance per
/// (post, action) pair; repeated triggers are no-ops, never
/// queued.
pub struct Controller {
    api: Arc<dyn FeedApi>,
    store: Arc<FeedStore>,
    sessions: Arc<SessionAccessor>,
}

impl Controller {
    pub fn new(api: Arc<dyn FeedApi>, store: Arc<FeedStore>, sessions: Arc<SessionAccessor>) -> Self {
        Self {
            api,
            store,
            sessions,
        }
    }

    /// Likes or unlikes a post, based on the viewer-liked state
    /// read at invocation time.
    ///
    /// On success the authoritative like count is re-fetched and
    /// written through the in-flight guard; a failed re-fetch
    /// degrades to keeping the previous count.
    pub async fn toggle_like(&self, post_id: u64) -> Result<Outcome, Error> {
        let session = self.sessions.require()?;
        if !self.store.try_begin(post_id, ActionKind::Like) {
            return Ok(Outcome::Skipped);
        }

        let result = async {
            let liked = self.store.post_ui(post_id).viewer_liked;
            if liked {
                self.api.unlike(post_id, session.token()).await?;
            } else {
                self.api.like(post_id, session.token()).await?;
            }

            let count = match self.api.likes_count(post_id).await {
                Ok(count) => Some(count),
                Err(err) => {
                    warn!(post_id, "likes count re-fetch failed: {err}");
                    None
                }
            };
            self.store.confirm_like(post_id, count, !liked);
            Ok(Outcome::Applied)
        }
        .await;

        self.store.finish(post_id, ActionKind::Like);
        result
    }

    /// Submits the post's current draft as a comment.
    ///
    /// The draft is cleared only on success; on failure it stays
    /// so the viewer does not lose input.
    pub async fn add_comment(&self, post_id: u64) -> Result<Outcome, Error> {
        let session = self.sessions.require()?;
        let draft = self.store.draft(post_id);
        if draft.trim().is_empty() {
            return Err(Error::EmptyComment);
        }
        if session.is_muted() {
            return Err(Error::Muted);
        }
        if !self.store.try_begin(post_id, ActionKind::Comment) {
            return Ok(Outcome::Skipped);
        }

        let result = async {
            self.api
                .add_comment(post_id, session.token(), &draft)
                .await?;
            self.store.set_draft(post_id, String::new());
            self.refresh_comments(post_id).await;
            self.store.set_panel_visible(post_id, true);
            Ok(Outcome::Applied)
        }
        .await;

        self.store.finish(post_id, ActionKind::Comment);
        result
    }

    /// Deletes a comment; permitted for its author and for admins.
    pub async fn delete_comment(&self, post_id: u64, comment_id: u64) -> Result<Outcome, Error> {
        let session = self.sessions.require()?;
        let comment = self
            .store
            .comments(post_id)
            .into_iter()
            .find(|comment| comment.id == comment_id)
            .ok_or(Error::NotFound)?;
        if comment.user_id != session.user_id && !session.is_admin() {
            return Err(Error::PermissionDenied);
        }
        if !self.store.try_begin(post_id, ActionKind::DeleteComment) {
            return Ok(Outcome::Skipped);
        }

        let result = async {
            self.api.delete_comment(comment_id, session.token()).await?;
            self.refresh_comments(post_id).await;
            Ok(Outcome::Applied)
        }
        .await;

        self.store.finish(post_id, ActionKind::DeleteComment);
        result
    }

    /// Deletes a post; admin-only, and requires the confirmation
    /// prompt to have been answered before anything is sent.
    ///
    /// On success the post is dropped from local state and the
    /// caller should navigate away from the detail view.
    pub async fn delete_post(
        &self,
        post_id: u64,
        confirmation: Confirmation,
    ) -> Result<Outcome, Error> {
        let session = self.sessions.require()?;
        if !session.is_admin() {
            return Err(Error::PermissionDenied);
        }
        if confirmation == Confirmation::Cancelled {
            return Ok(Outcome::Skipped);
        }
        if !self.store.try_begin(post_id, ActionKind::DeletePost) {
            return Ok(Outcome::Skipped);
        }

        let result = async {
            self.api.delete_post(post_id, session.token()).await?;
            self.store.remove_post(post_id);
            Ok(Outcome::Applied)
        }
        .await;

        self.store.finish(post_id, ActionKind::DeletePost);
        result
    }

    /// Toggles a post's comments panel; fetches the comment list
    /// whenever the panel turns visible.
    pub async fn show_comments(&self, post_id: u64) {
        if self.store.toggle_panel(post_id) {
            self.refresh_comments(post_id).await;
        }
    }

    /// Re-fetches and replaces a post's comment list wholesale.
    /// A failed fetch keeps the previous list.
    async fn refresh_comments(&self, post_id: u64) {
        match self.api.list_comments(post_id).await {
            Ok(comments) => self.store.set_comments(post_id, comments),
            Err(err) => warn!(post_id, "comment list fetch failed: {err}"),
        }
    }
}
