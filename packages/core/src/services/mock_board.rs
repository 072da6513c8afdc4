//! In-memory `BoardApi` used by page-controller tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{
    Author, Comment, CreatedPost, LoginData, Pageable, PasswordChange, PostDetail, PostPage,
    PostSummary, SignupRequest, UserProfile,
};
use crate::services::provider::{ApiResult, BoardApi, PostDraft, ProfileUpdate};
use crate::services::upload::Upload;
use crate::session::CurrentUser;

#[derive(Default)]
struct State {
    user: Option<CurrentUser>,
    posts: Vec<PostSummary>,
    details: HashMap<i64, PostDetail>,
    comments: HashMap<i64, Vec<Comment>>,
    liked: HashMap<i64, bool>,
    drafts: Vec<(Option<i64>, PostDraft)>,
    password_changes: Vec<PasswordChange>,
    profile_updates: Vec<ProfileUpdate>,
    signups: Vec<(SignupRequest, Option<Upload>)>,
    calls: Vec<String>,
    next_id: i64,
    offline: bool,
}

pub struct MockBoard {
    state: Mutex<State>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1_000,
                ..State::default()
            }),
        }
    }

    /// Logged in as `user_id`.
    pub fn with_user(self, user_id: i64) -> Self {
        self.state.lock().unwrap().user = Some(CurrentUser {
            user_id: Some(user_id),
            nickname: Some(format!("user{}", user_id)),
            profile_image_url: None,
        });
        self
    }

    /// `count` posts, each written by `author_id`.
    pub fn with_posts(self, count: i64, author_id: i64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for post_id in 1..=count {
                let author = Author {
                    user_id: author_id,
                    nickname: Some(format!("user{}", author_id)),
                    profile_image_url: None,
                };
                state.posts.push(PostSummary {
                    post_id,
                    title: format!("post {}", post_id),
                    likes: 0,
                    comments: 0,
                    views: 0,
                    created_at: "2024-02-19 14:30:00".into(),
                    author: Some(author.clone()),
                });
                state.details.insert(
                    post_id,
                    PostDetail {
                        post_id,
                        title: format!("post {}", post_id),
                        content: format!("body {}", post_id),
                        likes: 0,
                        comments: 0,
                        views: 0,
                        created_at: "2024-02-19 14:30:00".into(),
                        author: Some(author),
                        images: Vec::new(),
                        liked_by_me: false,
                    },
                );
            }
        }
        self
    }

    pub fn with_comment(self, post_id: i64, comment_id: i64, author_id: i64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.comments.entry(post_id).or_default().push(Comment {
                comment_id,
                content: format!("comment {}", comment_id),
                created_at: "2024-02-19 15:00:00".into(),
                author: Some(Author {
                    user_id: author_id,
                    nickname: None,
                    profile_image_url: None,
                }),
            });
            if let Some(post) = state.details.get_mut(&post_id) {
                post.comments += 1;
            }
        }
        self
    }

    /// Every call fails with a network error.
    pub fn offline(self) -> Self {
        self.state.lock().unwrap().offline = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn drafts(&self) -> Vec<(Option<i64>, PostDraft)> {
        self.state.lock().unwrap().drafts.clone()
    }

    pub fn password_changes(&self) -> Vec<PasswordChange> {
        self.state.lock().unwrap().password_changes.clone()
    }

    pub fn profile_updates(&self) -> Vec<ProfileUpdate> {
        self.state.lock().unwrap().profile_updates.clone()
    }

    pub fn signups(&self) -> Vec<(SignupRequest, Option<Upload>)> {
        self.state.lock().unwrap().signups.clone()
    }

    fn enter(&self, call: impl Into<String>) -> ApiResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.into());
        if state.offline {
            return Err(AppError::Network("connection refused".into()));
        }
        Ok(state)
    }

    fn not_found(what: &str) -> AppError {
        AppError::api(404, format!("{} not found", what))
    }
}

#[async_trait]
impl BoardApi for MockBoard {
    async fn current_user(&self) -> CurrentUser {
        self.state.lock().unwrap().user.clone().unwrap_or(CurrentUser {
            user_id: None,
            nickname: None,
            profile_image_url: None,
        })
    }

    async fn is_logged_in(&self) -> bool {
        self.state.lock().unwrap().user.is_some()
    }

    async fn signup(&self, form: &SignupRequest, profile_image: Option<Upload>) -> ApiResult<()> {
        let mut state = self.enter("signup")?;
        state.signups.push((form.clone(), profile_image));
        Ok(())
    }

    async fn login(&self, email: &str, _password: &str) -> ApiResult<LoginData> {
        let mut state = self.enter(format!("login {}", email))?;
        state.user = Some(CurrentUser {
            user_id: Some(1),
            nickname: Some("user1".into()),
            profile_image_url: None,
        });
        Ok(LoginData {
            token: "token".into(),
            refresh_token: "refresh".into(),
            user_id: 1,
            nickname: "user1".into(),
            profile_image_url: None,
        })
    }

    async fn logout(&self) -> ApiResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("logout".into());
        state.user = None;
        Ok(!state.offline)
    }

    async fn profile(&self) -> ApiResult<UserProfile> {
        let state = self.enter("profile")?;
        let user = state.user.clone().ok_or(AppError::SessionExpired)?;
        Ok(UserProfile {
            user_id: user.user_id,
            email: Some("user@example.com".into()),
            nickname: user.nickname.unwrap_or_default(),
            profile_image_url: user.profile_image_url,
        })
    }

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<UserProfile> {
        let mut state = self.enter("update_profile")?;
        state.profile_updates.push(update.clone());
        let user = state.user.as_mut().ok_or(AppError::SessionExpired)?;
        if let Some(nickname) = update.nickname {
            user.nickname = Some(nickname);
        }
        if let Some(image) = update.profile_image {
            user.profile_image_url = Some(format!("http://img/{}", image.file_name));
        }
        Ok(UserProfile {
            user_id: user.user_id,
            email: None,
            nickname: user.nickname.clone().unwrap_or_default(),
            profile_image_url: user.profile_image_url.clone(),
        })
    }

    async fn change_password(&self, change: &PasswordChange) -> ApiResult<()> {
        let mut state = self.enter("change_password")?;
        state.password_changes.push(change.clone());
        Ok(())
    }

    async fn withdraw(&self) -> ApiResult<()> {
        let mut state = self.enter("withdraw")?;
        state.user = None;
        Ok(())
    }

    async fn list_posts(&self, page: u32, size: u32) -> ApiResult<PostPage> {
        let state = self.enter(format!("list_posts {} {}", page, size))?;
        let total = state.posts.len() as u32;
        let total_pages = total.div_ceil(size.max(1));
        let start = ((page.saturating_sub(1)) * size) as usize;
        let content = state
            .posts
            .iter()
            .skip(start)
            .take(size as usize)
            .cloned()
            .collect();
        Ok(PostPage {
            content,
            pageable: Pageable {
                page,
                size: Some(size),
                total_pages,
                total_elements: Some(u64::from(total)),
            },
        })
    }

    async fn post(&self, post_id: i64) -> ApiResult<PostDetail> {
        let state = self.enter(format!("post {}", post_id))?;
        let mut post = state
            .details
            .get(&post_id)
            .cloned()
            .ok_or_else(|| Self::not_found("post"))?;
        post.liked_by_me = state.liked.get(&post_id).copied().unwrap_or(false);
        Ok(post)
    }

    async fn create_post(&self, draft: PostDraft) -> ApiResult<CreatedPost> {
        let mut state = self.enter("create_post")?;
        state.next_id += 1;
        let post_id = state.next_id;
        state.drafts.push((None, draft));
        Ok(CreatedPost { post_id })
    }

    async fn update_post(&self, post_id: i64, draft: PostDraft) -> ApiResult<()> {
        let mut state = self.enter(format!("update_post {}", post_id))?;
        let post = state
            .details
            .get_mut(&post_id)
            .ok_or_else(|| Self::not_found("post"))?;
        post.title = draft.title.clone();
        post.content = draft.content.clone();
        state.drafts.push((Some(post_id), draft));
        Ok(())
    }

    async fn delete_post(&self, post_id: i64) -> ApiResult<()> {
        let mut state = self.enter(format!("delete_post {}", post_id))?;
        state
            .details
            .remove(&post_id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found("post"))
    }

    async fn comments(&self, post_id: i64) -> ApiResult<Vec<Comment>> {
        let state = self.enter(format!("comments {}", post_id))?;
        Ok(state.comments.get(&post_id).cloned().unwrap_or_default())
    }

    async fn create_comment(&self, post_id: i64, content: &str) -> ApiResult<()> {
        let mut state = self.enter(format!("create_comment {}", post_id))?;
        state.next_id += 1;
        let comment_id = state.next_id;
        let user_id = state
            .user
            .as_ref()
            .and_then(|user| user.user_id)
            .unwrap_or_default();
        state.comments.entry(post_id).or_default().push(Comment {
            comment_id,
            content: content.to_string(),
            created_at: "2024-02-20 09:00:00".into(),
            author: Some(Author {
                user_id,
                nickname: None,
                profile_image_url: None,
            }),
        });
        Ok(())
    }

    async fn update_comment(&self, comment_id: i64, content: &str) -> ApiResult<()> {
        let mut state = self.enter(format!("update_comment {}", comment_id))?;
        let comment = state
            .comments
            .values_mut()
            .flatten()
            .find(|comment| comment.comment_id == comment_id)
            .ok_or_else(|| Self::not_found("comment"))?;
        comment.content = content.to_string();
        Ok(())
    }

    async fn delete_comment(&self, comment_id: i64) -> ApiResult<()> {
        let mut state = self.enter(format!("delete_comment {}", comment_id))?;
        for comments in state.comments.values_mut() {
            comments.retain(|comment| comment.comment_id != comment_id);
        }
        Ok(())
    }

    async fn like(&self, post_id: i64) -> ApiResult<()> {
        let mut state = self.enter(format!("like {}", post_id))?;
        state.liked.insert(post_id, true);
        Ok(())
    }

    async fn unlike(&self, post_id: i64) -> ApiResult<()> {
        let mut state = self.enter(format!("unlike {}", post_id))?;
        state.liked.insert(post_id, false);
        Ok(())
    }

    async fn like_status(&self, post_id: i64) -> ApiResult<bool> {
        let state = self.enter(format!("like_status {}", post_id))?;
        Ok(state.liked.get(&post_id).copied().unwrap_or(false))
    }
}
