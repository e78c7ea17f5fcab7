pub mod post;

use crate::Error;
use tcc_shared::post::{Comment, Post};

/// Shared state of the remote gateway: one reqwest client plus
/// the base url every API path is joined onto.
pub struct Context {
    pub client: reqwest::Client,
    pub api_base: String,
}

impl Context {
    pub fn new(api_base: impl Into<String>, timeout: std::time::Duration) -> Result<Self, Error> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(Error::Transport)?,
            api_base: api_base.into(),
        })
    }

    pub fn from_config() -> Result<Self, Error> {
        let config = &*crate::config::INSTANCE;
        Self::new(
            config.api_base_url.clone(),
            std::time::Duration::from_secs(config.request_timeout_secs),
        )
    }
}

/// A single remote operation of the feed API.
#[async_trait::async_trait]
pub trait Request {
    type Output;

    fn method(&self) -> reqwest::Method {
        reqwest::Method::GET
    }

    fn url_suffix(&self) -> String;

    fn make_req(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req
    }

    async fn parse_res(&mut self, response: reqwest::Response) -> Result<Self::Output, Error>;
}

/// Calls a [`Request`] and return its output.
///
/// Never panics past this boundary: transport failures and
/// non-success statuses come back as tagged [`Error`] values.
pub async fn call<T: Request>(mut req: T, cx: &Context) -> Result<<T as Request>::Output, Error> {
    let response = req
        .make_req(
            cx.client
                .request(req.method(), format!("{}{}", cx.api_base, req.url_suffix())),
        )
        .send()
        .await
        .map_err(Error::Transport)?;
    let status = response.status();

    if !status.is_success() {
        #[derive(serde::Deserialize)]
        struct ThrownError {
            error: String,
        }

        if let Ok(thrown) = response.json::<ThrownError>().await {
            tracing::debug!(%status, error = %thrown.error, "request rejected by server");
        }

        return Err(Error::from_status(status));
    }

    req.parse_res(response).await
}

/// The remote feed operations, one method per endpoint.
///
/// The polling and interaction layers only see this trait, so
/// tests can substitute a scripted implementation for the network.
#[async_trait::async_trait]
pub trait FeedApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;
    async fn get_post(&self, post_id: u64) -> Result<Post, Error>;

    async fn likes_count(&self, post_id: u64) -> Result<u64, Error>;
    async fn viewer_liked(&self, post_id: u64, token: &str) -> Result<bool, Error>;
    async fn like(&self, post_id: u64, token: &str) -> Result<(), Error>;
    async fn unlike(&self, post_id: u64, token: &str) -> Result<(), Error>;

    async fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, Error>;
    async fn add_comment(&self, post_id: u64, token: &str, text: &str) -> Result<(), Error>;
    async fn delete_comment(&self, comment_id: u64, token: &str) -> Result<(), Error>;

    async fn delete_post(&self, post_id: u64, token: &str) -> Result<(), Error>;

    async fn latest_announcement(&self) -> Result<Option<String>, Error>;
    async fn profile_photo(&self, user_id: u64, token: &str) -> Result<Option<String>, Error>;
}

/// [`FeedApi`] over HTTP/JSON.
pub struct HttpGateway {
    cx: Context,
}

impl HttpGateway {
    pub fn new(cx: Context) -> Self {
        Self { cx }
    }

    pub fn from_config() -> Result<Self, Error> {
        Ok(Self::new(Context::from_config()?))
    }
}

#[async_trait::async_trait]
impl FeedApi for HttpGateway {
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        call(post::ListPosts, &self.cx).await
    }

    async fn get_post(&self, post_id: u64) -> Result<Post, Error> {
        call(post::GetPost { post_id }, &self.cx).await
    }

    async fn likes_count(&self, post_id: u64) -> Result<u64, Error> {
        call(post::LikesCount { post_id }, &self.cx).await
    }

    async fn viewer_liked(&self, post_id: u64, token: &str) -> Result<bool, Error> {
        call(post::ViewerLiked { post_id, token }, &self.cx).await
    }

    async fn like(&self, post_id: u64, token: &str) -> Result<(), Error> {
        call(post::Like { post_id, token }, &self.cx).await
    }

    async fn unlike(&self, post_id: u64, token: &str) -> Result<(), Error> {
        call(post::Unlike { post_id, token }, &self.cx).await
    }

    async fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, Error> {
        call(post::ListComments { post_id }, &self.cx).await
    }

    async fn add_comment(&self, post_id: u64, token: &str, text: &str) -> Result<(), Error> {
        call(
            post::AddComment {
                post_id,
                token,
                text,
            },
            &self.cx,
        )
        .await
    }

    async fn delete_comment(&self, comment_id: u64, token: &str) -> Result<(), Error> {
        call(post::DeleteComment { comment_id, token }, &self.cx).await
    }

    async fn delete_post(&self, post_id: u64, token: &str) -> Result<(), Error> {
        call(post::DeletePost { post_id, token }, &self.cx).await
    }

    async fn latest_announcement(&self) -> Result<Option<String>, Error> {
        call(post::LatestAnnouncement, &self.cx).await
    }

    async fn profile_photo(&self, user_id: u64, token: &str) -> Result<Option<String>, Error> {
        call(post::ProfilePhoto { user_id, token }, &self.cx).await
    }
}
