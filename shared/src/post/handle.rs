use serde::{Deserialize, Serialize};

/// Body of an add-comment request.
#[derive(Serialize, Deserialize)]
pub struct CommentDescriptor {
    pub comment: String,
}

#[derive(Serialize, Deserialize)]
pub struct LikesCountResponse {
    pub count: u64,
}

#[derive(Serialize, Deserialize)]
pub struct UserLikesResponse {
    pub liked: bool,
}

#[derive(Serialize, Deserialize)]
pub struct AnnouncementResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePhotoResponse {
    /// `None` when the user never uploaded a photo.
    #[serde(default)]
    pub profile_photo_path: Option<String>,
}
