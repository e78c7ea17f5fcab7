use crate::Error;
use base64::Engine;
use serde::Deserialize;
use std::sync::Arc;
use tcc_shared::account::{Role, Status};

/// Storage holding the single bearer token entry.
///
/// Issuance and rotation belong to the authentication collaborator;
/// this crate only reads the token and removes it on expiry.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn clear(&self);
}

/// Token entry persisted as a plain file.
pub struct FileCredentialStore {
    path: std::path::PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// In-memory token entry, for embedders managing storage themselves.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: parking_lot::RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: parking_lot::RwLock::new(Some(token.into())),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}

/// Claims carried in the bearer token payload.
#[derive(Deserialize)]
struct Claims {
    id: u64,
    username: String,
    #[serde(default)]
    role: Role,
    #[serde(default)]
    status: Status,
    exp: i64,
}

/// The decoded identity of the viewer.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: u64,
    pub username: String,
    pub role: Role,
    pub status: Status,
    /// Expiry as seconds since the unix epoch.
    pub expires_at: i64,
    token: String,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= chrono::Utc::now().timestamp()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_muted(&self) -> bool {
        self.status == Status::Muted
    }

    /// The raw bearer token this session was decoded from.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Reads and validates the current viewer session.
pub struct SessionAccessor {
    store: Arc<dyn CredentialStore>,
}

impl SessionAccessor {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// The current session, or `None` when the token is
    /// absent or malformed. Expiry is not checked here.
    pub fn current(&self) -> Option<Session> {
        let token = self.store.token()?;
        let claims = decode_claims(&token)?;
        Some(Session {
            user_id: claims.id,
            username: claims.username,
            role: claims.role,
            status: claims.status,
            expires_at: claims.exp,
            token,
        })
    }

    /// A present, unexpired session, required before any mutation.
    ///
    /// An expired token is removed from storage so the caller can
    /// redirect to re-authentication.
    pub fn require(&self) -> Result<Session, Error> {
        match self.current() {
            None => Err(Error::NotLoggedIn),
            Some(session) if session.is_expired() => {
                self.store.clear();
                Err(Error::SessionExpired)
            }
            Some(session) => Ok(session),
        }
    }
}

/// Decodes the claims segment of a JWT without verifying the
/// signature. The server remains the authority on every
/// authenticated request, so the claims are display hints only.
fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}
