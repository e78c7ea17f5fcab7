
use crate::feed::handle::Controller;
use crate::feed::FeedStore;
use crate::gateway::FeedApi;
use crate::session::{MemoryCredentialStore, SessionAccessor};
use crate::Error;
use base64::Engine;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::sync::Arc;
use tcc_shared::account::Role;
use tcc_shared::post::{Comment, Post};

/// Builds an unsigned bearer token carrying the given claims.
fn token_with(user_id: u64, role: &str, status: &str, exp: i64) -> String {
    let encode = |value: &serde_json::Value| {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(value.to_string())
    };
    let header = encode(&serde_json::json!({ "alg": "HS256", "typ": "JWT" }));
    let payload = encode(&serde_json::json!({
        "id": user_id,
        "username": format!("user{user_id}"),
        "role": role,
        "status": status,
        "exp": exp,
    }));
    format!("{header}.{payload}.sig")
}

fn fresh_token(user_id: u64, role: &str) -> String {
    token_with(user_id, role, "none", chrono::Utc::now().timestamp() + 3600)
}

fn sample_post(id: u64) -> Post {
    Post {
        id,
        title: format!("Post {id}"),
        content: "Hello campus".to_string(),
        user_id: 100 + id,
        username: format!("author{id}"),
        role: Role::User,
        category: "general".to_string(),
        created_at: chrono::Utc::now(),
        image_url: None,
    }
}

fn sample_comment(id: u64, post_id: u64, user_id: u64) -> Comment {
    Comment {
        id,
        post_id,
        user_id,
        username: format!("user{user_id}"),
        comment: format!("comment {id}"),
        timestamp: chrono::Utc::now(),
    }
}

/// A scripted [`FeedApi`] standing in for the remote server.
///
/// State maps play the server role so mutations observably land;
/// every call that reaches the "network" is logged, and single
/// endpoints can be scripted to fail or to block on a gate.
#[derive(Default)]
struct ScriptedApi {
    posts: RwLock<Vec<Post>>,
    likes: DashMap<u64, u64>,
    liked: DashMap<u64, bool>,
    comments: DashMap<u64, Vec<Comment>>,
    announcement: RwLock<Option<String>>,
    photos: DashMap<u64, String>,

    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
    like_gate: Mutex<Option<Arc<tokio::sync::Semaphore>>>,
}

impl ScriptedApi {
    fn record(&self, name: &'static str) -> Result<(), Error> {
        self.calls.lock().push(name);
        if self.failing.lock().contains(name) {
            Err(Error::Server(500))
        } else {
            Ok(())
        }
    }

    fn fail(&self, name: &'static str) {
        self.failing.lock().insert(name);
    }

    fn called(&self, name: &'static str) -> bool {
        self.calls.lock().contains(&name)
    }

    fn call_count(&self, name: &'static str) -> usize {
        self.calls.lock().iter().filter(|c| **c == name).count()
    }

    /// Makes `like`/`unlike` block until a permit is added.
    fn gate_likes(&self) -> Arc<tokio::sync::Semaphore> {
        let gate = Arc::new(tokio::sync::Semaphore::new(0));
        *self.like_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    async fn wait_on_gate(&self) {
        let gate = self.like_gate.lock().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

#[async_trait::async_trait]
impl FeedApi for ScriptedApi {
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        self.record("list_posts")?;
        Ok(self.posts.read().clone())
    }

    async fn get_post(&self, post_id: u64) -> Result<Post, Error> {
        self.record("get_post")?;
        self.posts
            .read()
            .iter()
            .find(|post| post.id == post_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn likes_count(&self, post_id: u64) -> Result<u64, Error> {
        self.record("likes_count")?;
        Ok(self.likes.get(&post_id).map(|c| *c).unwrap_or(0))
    }

    async fn viewer_liked(&self, post_id: u64, _token: &str) -> Result<bool, Error> {
        self.record("viewer_liked")?;
        Ok(self.liked.get(&post_id).map(|l| *l).unwrap_or(false))
    }

    async fn like(&self, post_id: u64, _token: &str) -> Result<(), Error> {
        self.record("like")?;
        self.wait_on_gate().await;
        self.liked.insert(post_id, true);
        *self.likes.entry(post_id).or_insert(0) += 1;
        Ok(())
    }

    async fn unlike(&self, post_id: u64, _token: &str) -> Result<(), Error> {
        self.record("unlike")?;
        self.wait_on_gate().await;
        self.liked.insert(post_id, false);
        self.likes
            .entry(post_id)
            .and_modify(|count| *count = count.saturating_sub(1));
        Ok(())
    }

    async fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, Error> {
        self.record("list_comments")?;
        Ok(self
            .comments
            .get(&post_id)
            .map(|c| c.clone())
            .unwrap_or_default())
    }

    async fn add_comment(&self, post_id: u64, _token: &str, text: &str) -> Result<(), Error> {
        self.record("add_comment")?;
        let mut comments = self.comments.entry(post_id).or_default();
        let id = comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let mut comment = sample_comment(id, post_id, 1);
        comment.comment = text.to_string();
        comments.push(comment);
        Ok(())
    }

    async fn delete_comment(&self, comment_id: u64, _token: &str) -> Result<(), Error> {
        self.record("delete_comment")?;
        for mut entry in self.comments.iter_mut() {
            entry.value_mut().retain(|comment| comment.id != comment_id);
        }
        Ok(())
    }

    async fn delete_post(&self, post_id: u64, _token: &str) -> Result<(), Error> {
        self.record("delete_post")?;
        self.posts.write().retain(|post| post.id != post_id);
        Ok(())
    }

    async fn latest_announcement(&self) -> Result<Option<String>, Error> {
        self.record("latest_announcement")?;
        Ok(self.announcement.read().clone())
    }

    async fn profile_photo(&self, user_id: u64, _token: &str) -> Result<Option<String>, Error> {
        self.record("profile_photo")?;
        Ok(self.photos.get(&user_id).map(|p| p.clone()))
    }
}

/// A wired-up engine over a [`ScriptedApi`].
struct Env {
    api: Arc<ScriptedApi>,
    store: Arc<FeedStore>,
    creds: Arc<MemoryCredentialStore>,
    sessions: Arc<SessionAccessor>,
    controller: Arc<Controller>,
}

fn env(token: Option<String>) -> Env {
    let api = Arc::new(ScriptedApi::default());
    let store = Arc::new(FeedStore::new());
    let creds = Arc::new(match token {
        Some(token) => MemoryCredentialStore::with_token(token),
        None => MemoryCredentialStore::default(),
    });
    let sessions = Arc::new(SessionAccessor::new(
        Arc::clone(&creds) as Arc<dyn crate::session::CredentialStore>
    ));
    let controller = Arc::new(Controller::new(
        Arc::clone(&api) as Arc<dyn FeedApi>,
        Arc::clone(&store),
        Arc::clone(&sessions),
    ));
    Env {
        api,
        store,
        creds,
        sessions,
        controller,
    }
}

fn logged_in_env(user_id: u64, role: &str) -> Env {
    env(Some(fresh_token(user_id, role)))
}
