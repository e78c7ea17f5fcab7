pub mod attachment;
pub mod handle;
pub mod poll;
pub mod view;

use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tcc_shared::post::{Comment, Post};

/// Kinds of user-triggered mutations, each holding its own
/// in-flight slot per post.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionKind {
    Like,
    Comment,
    DeleteComment,
    DeletePost,
}

/// Ephemeral per-post state owned by the store.
#[derive(Debug, Clone, Default)]
pub struct PostUiState {
    pub like_count: u64,
    pub viewer_liked: bool,
    pub comments: Vec<Comment>,
    /// Draft text survives panel toggling; cleared only on a
    /// successful submission.
    pub draft: String,
    pub panel_visible: bool,

    like_in_flight: bool,
    comment_in_flight: bool,
    delete_comment_in_flight: bool,
    delete_post_in_flight: bool,
}

impl PostUiState {
    pub fn in_flight(&self, kind: ActionKind) -> bool {
        *self.slot(kind)
    }

    fn slot(&self, kind: ActionKind) -> &bool {
        match kind {
            ActionKind::Like => &self.like_in_flight,
            ActionKind::Comment => &self.comment_in_flight,
            ActionKind::DeleteComment => &self.delete_comment_in_flight,
            ActionKind::DeletePost => &self.delete_post_in_flight,
        }
    }

    fn slot_mut(&mut self, kind: ActionKind) -> &mut bool {
        match kind {
            ActionKind::Like => &mut self.like_in_flight,
            ActionKind::Comment => &mut self.comment_in_flight,
            ActionKind::DeleteComment => &mut self.delete_comment_in_flight,
            ActionKind::DeletePost => &mut self.delete_post_in_flight,
        }
    }
}

/// The focused post of the detail view with its resolved author photo.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    /// Absolute url of the author's photo, `None` when unset.
    pub author_photo: Option<String>,
}

/// The single authoritative in-memory representation of the feed.
///
/// Every mutation is synchronous and atomic with respect to one
/// logical update, and becomes a silent no-op once [`close`] has
/// run, so responses resolving after teardown never land.
///
/// [`close`]: FeedStore::close
pub struct FeedStore {
    posts: RwLock<Vec<Post>>,
    focused: RwLock<Option<PostDetail>>,
    announcement: RwLock<Option<String>>,
    ui: DashMap<u64, PostUiState>,
    live: AtomicBool,
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            focused: RwLock::new(None),
            announcement: RwLock::new(None),
            ui: DashMap::new(),
            live: AtomicBool::new(true),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Marks the store torn down. Late completions are discarded
    /// from this point on.
    pub fn close(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.read().clone()
    }

    pub fn replace_post_list(&self, posts: Vec<Post>) {
        if !self.is_live() {
            return;
        }
        *self.posts.write() = posts;
    }

    /// Merges a background like snapshot for a post.
    ///
    /// No-op while a like toggle for the same post is in flight:
    /// the toggle's confirmed result takes precedence over any
    /// refresh that raced ahead of it. `viewer_liked` is absent
    /// when the viewer-likes fetch failed or had no credential.
    pub fn merge_like_snapshot(&self, post_id: u64, count: u64, viewer_liked: Option<bool>) {
        if !self.is_live() {
            return;
        }
        let mut ui = self.ui.entry(post_id).or_default();
        if ui.like_in_flight {
            return;
        }
        ui.like_count = count;
        if let Some(liked) = viewer_liked {
            ui.viewer_liked = liked;
        }
    }

    /// Writes the confirmed result of a like toggle.
    ///
    /// Unlike [`merge_like_snapshot`] this ignores the in-flight
    /// guard: it is the very mutation the guard protects.
    ///
    /// [`merge_like_snapshot`]: FeedStore::merge_like_snapshot
    pub fn confirm_like(&self, post_id: u64, count: Option<u64>, viewer_liked: bool) {
        if !self.is_live() {
            return;
        }
        let mut ui = self.ui.entry(post_id).or_default();
        ui.viewer_liked = viewer_liked;
        if let Some(count) = count {
            ui.like_count = count;
        }
    }

    /// Replaces a post's comment list wholesale with the most
    /// recent successful fetch.
    pub fn set_comments(&self, post_id: u64, comments: Vec<Comment>) {
        if !self.is_live() {
            return;
        }
        self.ui.entry(post_id).or_default().comments = comments;
    }

    pub fn comments(&self, post_id: u64) -> Vec<Comment> {
        self.ui
            .get(&post_id)
            .map(|ui| ui.comments.clone())
            .unwrap_or_default()
    }

    pub fn set_draft(&self, post_id: u64, text: impl Into<String>) {
        if !self.is_live() {
            return;
        }
        self.ui.entry(post_id).or_default().draft = text.into();
    }

    pub fn draft(&self, post_id: u64) -> String {
        self.ui
            .get(&post_id)
            .map(|ui| ui.draft.clone())
            .unwrap_or_default()
    }

    pub fn set_panel_visible(&self, post_id: u64, visible: bool) {
        if !self.is_live() {
            return;
        }
        self.ui.entry(post_id).or_default().panel_visible = visible;
    }

    /// Flips a post's comments panel, returning the new visibility.
    pub fn toggle_panel(&self, post_id: u64) -> bool {
        if !self.is_live() {
            return false;
        }
        let mut ui = self.ui.entry(post_id).or_default();
        ui.panel_visible = !ui.panel_visible;
        ui.panel_visible
    }

    /// Claims the in-flight slot for a (post, action) pair.
    ///
    /// Returns `false` when an instance of the same pair is
    /// already running, or after teardown; the caller must then
    /// treat the trigger as a no-op.
    pub fn try_begin(&self, post_id: u64, kind: ActionKind) -> bool {
        if !self.is_live() {
            return false;
        }
        let mut ui = self.ui.entry(post_id).or_default();
        let slot = ui.slot_mut(kind);
        if *slot {
            false
        } else {
            *slot = true;
            true
        }
    }

    /// Releases the in-flight slot, on success and failure alike.
    pub fn finish(&self, post_id: u64, kind: ActionKind) {
        if let Some(mut ui) = self.ui.get_mut(&post_id) {
            *ui.slot_mut(kind) = false;
        }
    }

    /// Drops a post from local state after a confirmed delete.
    pub fn remove_post(&self, post_id: u64) {
        if !self.is_live() {
            return;
        }
        self.posts.write().retain(|post| post.id != post_id);
        self.ui.remove(&post_id);
        let mut focused = self.focused.write();
        if focused.as_ref().is_some_and(|d| d.post.id == post_id) {
            *focused = None;
        }
    }

    pub fn set_focused(&self, detail: PostDetail) {
        if !self.is_live() {
            return;
        }
        *self.focused.write() = Some(detail);
    }

    pub fn focused(&self) -> Option<PostDetail> {
        self.focused.read().clone()
    }

    pub fn set_announcement(&self, message: Option<String>) {
        if !self.is_live() {
            return;
        }
        *self.announcement.write() = message;
    }

    pub fn announcement(&self) -> Option<String> {
        self.announcement.read().clone()
    }

    /// A snapshot of a post's ephemeral state; defaults for
    /// posts never touched.
    pub fn post_ui(&self, post_id: u64) -> PostUiState {
        self.ui
            .get(&post_id)
            .map(|ui| ui.clone())
            .unwrap_or_default()
    }
}
