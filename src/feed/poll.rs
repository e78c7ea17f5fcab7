use super::{FeedStore, PostDetail};
use crate::gateway::FeedApi;
use crate::session::SessionAccessor;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Handle of a running poll loop. Dropping it does not stop the
/// loop; call [`shutdown`] on navigation away from the feed.
///
/// [`shutdown`]: PollHandle::shutdown
pub struct PollHandle {
    task: tokio::task::JoinHandle<()>,
    store: Arc<FeedStore>,
}

impl PollHandle {
    /// Stops polling and closes the store, so responses still in
    /// flight are discarded when they resolve.
    pub fn shutdown(self) {
        self.store.close();
        self.task.abort();
    }
}

/// Starts the fixed-interval refresh loop. The first cycle runs
/// immediately.
pub fn spawn(
    api: Arc<dyn FeedApi>,
    store: Arc<FeedStore>,
    sessions: Arc<SessionAccessor>,
    interval: Duration,
) -> PollHandle {
    let task = tokio::spawn(run(api, Arc::clone(&store), sessions, interval));
    PollHandle { task, store }
}

async fn run(
    api: Arc<dyn FeedApi>,
    store: Arc<FeedStore>,
    sessions: Arc<SessionAccessor>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        cycle(Arc::clone(&api), &store, &sessions).await;
    }
}

/// One full poll cycle: list refresh plus per-post enrichment.
///
/// Failed reads are logged and skipped; the next tick is the
/// retry policy.
pub async fn cycle(api: Arc<dyn FeedApi>, store: &FeedStore, sessions: &SessionAccessor) {
    let posts = match api.list_posts().await {
        Ok(posts) => posts,
        Err(err) => {
            warn!("post list refresh failed: {err}");
            return;
        }
    };
    let ids: Vec<u64> = posts.iter().map(|post| post.id).collect();
    store.replace_post_list(posts);

    let token = sessions.current().map(|s| s.token().to_string());

    let mut set = JoinSet::new();
    for post_id in ids {
        let api = Arc::clone(&api);
        let token = token.clone();
        set.spawn(async move {
            let count = match api.likes_count(post_id).await {
                Ok(count) => Some(count),
                Err(err) => {
                    debug!(post_id, "likes count refresh failed: {err}");
                    None
                }
            };
            let liked = match &token {
                Some(token) => match api.viewer_liked(post_id, token).await {
                    Ok(liked) => Some(liked),
                    Err(err) => {
                        debug!(post_id, "viewer likes refresh failed: {err}");
                        None
                    }
                },
                None => None,
            };
            (post_id, count, liked)
        });
    }

    while let Some(joined) = set.join_next().await {
        if let Ok((post_id, Some(count), liked)) = joined {
            store.merge_like_snapshot(post_id, count, liked);
        }
    }
}

/// One-shot fetch for the detail view, independent of the list
/// poll: post, then author photo, then latest announcement.
pub async fn fetch_detail(
    api: &dyn FeedApi,
    store: &FeedStore,
    sessions: &SessionAccessor,
    post_id: u64,
) {
    let post = match api.get_post(post_id).await {
        Ok(post) => post,
        Err(err) => {
            warn!(post_id, "post detail fetch failed: {err}");
            return;
        }
    };

    let author_photo = match sessions.current() {
        Some(session) => match api.profile_photo(post.user_id, session.token()).await {
            Ok(path) => path,
            Err(err) => {
                debug!(user_id = post.user_id, "profile photo fetch failed: {err}");
                None
            }
        },
        None => None,
    };

    store.set_focused(PostDetail { post, author_photo });

    match api.latest_announcement().await {
        Ok(message) => store.set_announcement(message),
        Err(err) => debug!("announcement fetch failed: {err}"),
    }
}
