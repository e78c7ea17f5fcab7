use serde::{Deserialize, Serialize};

/// Represents the role of an account.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrators may delete any post or comment.
    Admin,
    /// A regular member of the community.
    #[default]
    #[serde(other)]
    User,
}

/// Moderation status of an account.
///
/// A muted account keeps full read access but cannot submit comments.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Muted,
    #[default]
    #[serde(other)]
    Active,
}
