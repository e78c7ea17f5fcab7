use super::attachment::{classify, AttachmentKind};
use super::{ActionKind, PostUiState};
use crate::session::Session;
use tcc_shared::post::Comment;

/// Avatar shown when the author never uploaded a photo.
pub const FALLBACK_AVATAR: &str = "/static/default-avatar.png";

/// Render instructions for a post's attachment slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentView {
    Image { url: String },
    Video { url: String },
    Audio { url: String },
    /// Inline embed with a named download button.
    Document { url: String, file_name: String },
    /// Plain download link for unrecognized attachments.
    Download { url: String, label: String },
}

/// Derives the attachment rendering for a post, `None` for
/// text-only posts. Attachment paths are served relative to the
/// API base.
pub fn attachment_view(api_base: &str, image_url: Option<&str>) -> Option<AttachmentView> {
    let path = image_url?;
    let url = format!("{api_base}{path}");
    Some(match classify(path) {
        AttachmentKind::Image => AttachmentView::Image { url },
        AttachmentKind::Video => AttachmentView::Video { url },
        AttachmentKind::Audio => AttachmentView::Audio { url },
        AttachmentKind::Document => AttachmentView::Document {
            file_name: path.rsplit('/').next().unwrap_or(path).to_string(),
            url,
        },
        AttachmentKind::Generic => AttachmentView::Download {
            label: path.replace("/uploads/image-", ""),
            url,
        },
    })
}

/// A comment plus the affordances the viewer gets on it.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub can_delete: bool,
}

/// Delete is offered to the comment's author and to admins.
pub fn comment_views(comments: &[Comment], viewer: Option<&Session>) -> Vec<CommentView> {
    comments
        .iter()
        .map(|comment| CommentView {
            can_delete: viewer
                .is_some_and(|v| v.user_id == comment.user_id || v.is_admin()),
            comment: comment.clone(),
        })
        .collect()
}

/// State of the comment composer below a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerView {
    pub placeholder: &'static str,
    pub draft: String,
    /// Muted viewers cannot type.
    pub input_disabled: bool,
    /// Submission is held while muted or while a submission is
    /// already in flight.
    pub submit_disabled: bool,
}

pub fn composer_view(ui: &PostUiState, viewer: Option<&Session>) -> ComposerView {
    let muted = viewer.is_some_and(Session::is_muted);
    ComposerView {
        placeholder: if muted {
            "You are muted and cannot comment"
        } else {
            "Write a comment..."
        },
        draft: ui.draft.clone(),
        input_disabled: muted,
        submit_disabled: muted || ui.in_flight(ActionKind::Comment),
    }
}

/// State of a post's like button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeButton {
    pub count: u64,
    pub liked: bool,
    /// Held while a toggle is in flight.
    pub disabled: bool,
}

pub fn like_button(ui: &PostUiState) -> LikeButton {
    LikeButton {
        count: ui.like_count,
        liked: ui.viewer_liked,
        disabled: ui.in_flight(ActionKind::Like),
    }
}

/// Absolute url of an author photo, falling back to the default
/// avatar for users without one.
pub fn author_photo_url(api_base: &str, photo_path: Option<&str>) -> String {
    match photo_path {
        Some(path) => format!("{api_base}{path}"),
        None => FALLBACK_AVATAR.to_string(),
    }
}

/// The delete-post affordance is admin-only.
pub fn can_delete_post(viewer: Option<&Session>) -> bool {
    viewer.is_some_and(Session::is_admin)
}
