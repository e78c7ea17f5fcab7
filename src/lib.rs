pub mod config;

pub mod feed;
pub mod gateway;
pub mod session;

/// The module for unit testing, only available in dev env.
#[cfg(test)]
mod tests;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport failure: {0}")]
    Transport(reqwest::Error),
    #[error("malformed response body: {0}")]
    MalformedResponse(reqwest::Error),

    #[error("unauthorized")]
    Unauthorized,
    #[error("permission denied")]
    PermissionDenied,
    #[error("resource not found")]
    NotFound,
    #[error("server errored with status {0}")]
    Server(u16),

    #[error("not logged in")]
    NotLoggedIn,
    #[error("session expired, login again")]
    SessionExpired,

    #[error("account is muted and cannot comment")]
    Muted,
    #[error("comment cannot be empty")]
    EmptyComment,
}

impl Error {
    /// Maps a non-success response status to the error taxonomy.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => Error::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => Error::PermissionDenied,
            reqwest::StatusCode::NOT_FOUND => Error::NotFound,
            _ => Error::Server(status.as_u16()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err)
        } else {
            Self::Transport(err)
        }
    }
}
