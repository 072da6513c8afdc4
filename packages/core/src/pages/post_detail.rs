//! Post detail: body, comments, likes.
//!
//! Counters shown on the page are adjusted locally after each successful
//! action rather than re-fetching the post, and never drop below zero.

use crate::error::AppError;
use crate::models::{Comment, PostDetail};
use crate::sample;
use crate::services::provider::BoardApi;
use crate::validation::{Field, ValidationError};

#[derive(Debug, Clone)]
pub struct PostDetailView {
    pub post: PostDetail,
    pub comments: Vec<Comment>,
    pub liked: bool,
    viewer_id: Option<i64>,
}

impl PostDetailView {
    pub async fn load(
        api: &dyn BoardApi,
        post_id: i64,
        sample_fallback: bool,
    ) -> Result<Self, AppError> {
        let post = match api.post(post_id).await {
            Ok(post) => post,
            Err(err) if sample_fallback && err.is_network() => {
                tracing::warn!("Post {} unavailable ({}); showing sample post", post_id, err);
                sample::sample_post(post_id)
            }
            Err(err) => return Err(err),
        };

        let comments = match api.comments(post_id).await {
            Ok(comments) => comments,
            Err(err) if sample_fallback && err.is_network() => {
                tracing::warn!("Comments unavailable ({}); showing samples", err);
                sample::sample_comments(post_id)
            }
            Err(err) => return Err(err),
        };

        let liked = if post.liked_by_me {
            true
        } else {
            match api.like_status(post_id).await {
                Ok(liked) => liked,
                Err(AppError::SessionExpired) => return Err(AppError::SessionExpired),
                Err(err) => {
                    tracing::warn!("Could not check like status for post {}: {}", post_id, err);
                    false
                }
            }
        };

        let viewer_id = api.current_user().await.user_id;

        Ok(Self {
            post,
            comments,
            liked,
            viewer_id,
        })
    }

    pub fn post_id(&self) -> i64 {
        self.post.post_id
    }

    /// Only the author may edit or delete a post.
    pub fn can_modify(&self) -> bool {
        is_owner(self.post.author.as_ref().map(|a| a.user_id), self.viewer_id)
    }

    pub fn can_modify_comment(&self, comment: &Comment) -> bool {
        is_owner(comment.author.as_ref().map(|a| a.user_id), self.viewer_id)
    }

    /// Like when not liked, unlike when liked. Returns the new state.
    pub async fn toggle_like(&mut self, api: &dyn BoardApi) -> Result<bool, AppError> {
        let post_id = self.post_id();
        if self.liked {
            api.unlike(post_id).await?;
            self.post.likes = self.post.likes.saturating_sub(1);
        } else {
            api.like(post_id).await?;
            self.post.likes += 1;
        }
        self.liked = !self.liked;
        Ok(self.liked)
    }

    pub async fn submit_comment(&mut self, api: &dyn BoardApi, content: &str) -> Result<(), AppError> {
        let content = non_empty_comment(content)?;
        let post_id = self.post_id();

        api.create_comment(post_id, content).await?;
        self.post.comments += 1;
        self.comments = api.comments(post_id).await?;
        Ok(())
    }

    pub async fn edit_comment(
        &mut self,
        api: &dyn BoardApi,
        comment_id: i64,
        content: &str,
    ) -> Result<(), AppError> {
        let content = non_empty_comment(content)?;
        self.owned_comment(comment_id)?;

        api.update_comment(comment_id, content).await?;
        self.comments = api.comments(self.post_id()).await?;
        Ok(())
    }

    pub async fn delete_comment(&mut self, api: &dyn BoardApi, comment_id: i64) -> Result<(), AppError> {
        self.owned_comment(comment_id)?;

        api.delete_comment(comment_id).await?;
        self.comments.retain(|comment| comment.comment_id != comment_id);
        self.post.comments = self.post.comments.saturating_sub(1);
        Ok(())
    }

    pub async fn delete_post(self, api: &dyn BoardApi) -> Result<(), AppError> {
        if !self.can_modify() {
            return Err(AppError::NotPermitted(
                "only the author can delete this post".to_string(),
            ));
        }
        api.delete_post(self.post_id()).await
    }

    fn owned_comment(&self, comment_id: i64) -> Result<&Comment, AppError> {
        let comment = self
            .comments
            .iter()
            .find(|comment| comment.comment_id == comment_id)
            .ok_or_else(|| AppError::api(404, format!("comment {} not found", comment_id)))?;

        if !self.can_modify_comment(comment) {
            return Err(AppError::NotPermitted(
                "only the author can change this comment".to_string(),
            ));
        }
        Ok(comment)
    }
}

fn is_owner(author_id: Option<i64>, viewer_id: Option<i64>) -> bool {
    matches!((author_id, viewer_id), (Some(author), Some(viewer)) if author == viewer)
}

fn non_empty_comment(content: &str) -> Result<&str, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::new(Field::Content, "Please enter a comment.").into());
    }
    Ok(content)
}
