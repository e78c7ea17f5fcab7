use crate::Error;
use reqwest::{Method, RequestBuilder, Response};
use tcc_shared::post::handle::*;
use tcc_shared::post::{Comment, Post};

pub struct ListPosts;

#[async_trait::async_trait]
impl super::Request for ListPosts {
    type Output = Vec<Post>;

    fn url_suffix(&self) -> String {
        "/api/posts/all".to_string()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        Ok(response.json().await?)
    }
}

pub struct GetPost {
    pub post_id: u64,
}

#[async_trait::async_trait]
impl super::Request for GetPost {
    type Output = Post;

    fn url_suffix(&self) -> String {
        format!("/api/posts/{}", self.post_id)
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        Ok(response.json().await?)
    }
}

pub struct LikesCount {
    pub post_id: u64,
}

#[async_trait::async_trait]
impl super::Request for LikesCount {
    type Output = u64;

    fn url_suffix(&self) -> String {
        format!("/api/posts/{}/likesCount", self.post_id)
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        Ok(response.json::<LikesCountResponse>().await?.count)
    }
}

pub struct ViewerLiked<'a> {
    pub post_id: u64,
    pub token: &'a str,
}

#[async_trait::async_trait]
impl super::Request for ViewerLiked<'_> {
    type Output = bool;

    fn url_suffix(&self) -> String {
        format!("/api/posts/{}/userLikes", self.post_id)
    }

    fn make_req(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.token)
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        Ok(response.json::<UserLikesResponse>().await?.liked)
    }
}

pub struct Like<'a> {
    pub post_id: u64,
    pub token: &'a str,
}

#[async_trait::async_trait]
impl super::Request for Like<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::POST
    }

    fn url_suffix(&self) -> String {
        format!("/api/posts/{}/like", self.post_id)
    }

    fn make_req(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.token)
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

pub struct Unlike<'a> {
    pub post_id: u64,
    pub token: &'a str,
}

#[async_trait::async_trait]
impl super::Request for Unlike<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn url_suffix(&self) -> String {
        format!("/api/posts/{}/unlike", self.post_id)
    }

    fn make_req(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.token)
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

pub struct ListComments {
    pub post_id: u64,
}

#[async_trait::async_trait]
impl super::Request for ListComments {
    type Output = Vec<Comment>;

    fn url_suffix(&self) -> String {
        format!("/api/posts/{}/comments", self.post_id)
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        Ok(response.json().await?)
    }
}

pub struct AddComment<'a> {
    pub post_id: u64,
    pub token: &'a str,
    pub text: &'a str,
}

#[async_trait::async_trait]
impl super::Request for AddComment<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::POST
    }

    fn url_suffix(&self) -> String {
        format!("/api/posts/{}/comment", self.post_id)
    }

    fn make_req(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.token).json(&CommentDescriptor {
            comment: self.text.to_string(),
        })
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

pub struct DeleteComment<'a> {
    pub comment_id: u64,
    pub token: &'a str,
}

#[async_trait::async_trait]
impl super::Request for DeleteComment<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn url_suffix(&self) -> String {
        format!("/api/comments/{}/delete", self.comment_id)
    }

    fn make_req(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.token)
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

pub struct DeletePost<'a> {
    pub post_id: u64,
    pub token: &'a str,
}

#[async_trait::async_trait]
impl super::Request for DeletePost<'_> {
    type Output = ();

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn url_suffix(&self) -> String {
        format!("/api/posts/delete/{}", self.post_id)
    }

    fn make_req(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.token)
    }

    async fn parse_res(&mut self, _response: Response) -> Result<Self::Output, Error> {
        Ok(())
    }
}

pub struct LatestAnnouncement;

#[async_trait::async_trait]
impl super::Request for LatestAnnouncement {
    type Output = Option<String>;

    fn url_suffix(&self) -> String {
        "/api/announcements/latest".to_string()
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        // The endpoint returns a json null when no announcement exists.
        Ok(response
            .json::<Option<AnnouncementResponse>>()
            .await?
            .and_then(|res| res.message))
    }
}

pub struct ProfilePhoto<'a> {
    pub user_id: u64,
    pub token: &'a str,
}

#[async_trait::async_trait]
impl super::Request for ProfilePhoto<'_> {
    type Output = Option<String>;

    fn url_suffix(&self) -> String {
        format!("/api/users/{}/profilePhoto", self.user_id)
    }

    fn make_req(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.token)
    }

    async fn parse_res(&mut self, response: Response) -> Result<Self::Output, Error> {
        Ok(response
            .json::<ProfilePhotoResponse>()
            .await?
            .profile_photo_path)
    }
}
