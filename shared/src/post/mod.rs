pub mod handle;

use crate::account::Role;
use serde::{Deserialize, Serialize};

/// Represents a post published by a user.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// The only id of this post.
    pub id: u64,
    pub title: String,
    pub content: String,
    /// The publisher of this post in user id.
    pub user_id: u64,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    pub category: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Path of the single attachment of this post, served
    /// under the API base url. `None` for text-only posts.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Represents a comment below a post.
///
/// Ordering inside a comment list is assigned by the server
/// and preserved as returned.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// The only id of this comment.
    pub id: u64,
    /// The post this comment belongs to.
    #[serde(default)]
    pub post_id: u64,
    /// The author of this comment in user id.
    pub user_id: u64,
    pub username: String,
    /// The text body, named `comment` on the wire.
    pub comment: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
