//! Board API interface
//!
//! Page controllers talk to the board through this trait so they can be
//! driven by the real HTTP client or by an in-memory double.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{
    Comment, CreatedPost, LoginData, PasswordChange, PostDetail, PostPage, SignupRequest,
    UserProfile,
};
use crate::services::upload::Upload;
use crate::session::CurrentUser;

pub type ApiResult<T> = Result<T, AppError>;

/// Title, body and images of a post being created or edited.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub images: Vec<Upload>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub nickname: Option<String>,
    pub profile_image: Option<Upload>,
}

#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Locally known identity; never touches the network.
    async fn current_user(&self) -> CurrentUser;

    async fn is_logged_in(&self) -> bool;

    async fn signup(&self, form: &SignupRequest, profile_image: Option<Upload>) -> ApiResult<()>;

    /// Authenticate and persist the returned session.
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginData>;

    /// Tell the server and forget the local session. The session is cleared
    /// even when the server cannot be reached; the flag reports whether the
    /// server acknowledged the logout.
    async fn logout(&self) -> ApiResult<bool>;

    async fn profile(&self) -> ApiResult<UserProfile>;

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<UserProfile>;

    async fn change_password(&self, change: &PasswordChange) -> ApiResult<()>;

    /// Delete the account, then log out.
    async fn withdraw(&self) -> ApiResult<()>;

    async fn list_posts(&self, page: u32, size: u32) -> ApiResult<PostPage>;

    async fn post(&self, post_id: i64) -> ApiResult<PostDetail>;

    async fn create_post(&self, draft: PostDraft) -> ApiResult<CreatedPost>;

    async fn update_post(&self, post_id: i64, draft: PostDraft) -> ApiResult<()>;

    async fn delete_post(&self, post_id: i64) -> ApiResult<()>;

    async fn comments(&self, post_id: i64) -> ApiResult<Vec<Comment>>;

    async fn create_comment(&self, post_id: i64, content: &str) -> ApiResult<()>;

    async fn update_comment(&self, comment_id: i64, content: &str) -> ApiResult<()>;

    async fn delete_comment(&self, comment_id: i64) -> ApiResult<()>;

    async fn like(&self, post_id: i64) -> ApiResult<()>;

    async fn unlike(&self, post_id: i64) -> ApiResult<()>;

    async fn like_status(&self, post_id: i64) -> ApiResult<bool>;
}
