use std::path::PathBuf;

use crate::error::AppError;
use crate::models::PostDetail;
use crate::services::provider::{BoardApi, PostDraft};
use crate::services::upload::Upload;
use crate::validation::{validate_post_input, Field, ValidationError};

/// Changes to apply; `None` keeps the current value. Without a new image the
/// post keeps the one it has.
#[derive(Debug, Clone, Default)]
pub struct PostEdit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<PathBuf>,
}

impl PostEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image.is_none()
    }
}

/// Apply `edit` on top of the stored post and return the post as saved.
pub async fn edit_post(
    api: &dyn BoardApi,
    post_id: i64,
    edit: &PostEdit,
) -> Result<PostDetail, AppError> {
    if edit.is_empty() {
        return Err(ValidationError::new(Field::Content, "Nothing to change.").into());
    }

    let current = api.post(post_id).await?;
    let viewer_id = api.current_user().await.user_id;
    if current.author.as_ref().map(|author| author.user_id) != viewer_id || viewer_id.is_none() {
        return Err(AppError::NotPermitted(
            "only the author can edit this post".to_string(),
        ));
    }

    let title = edit.title.as_deref().unwrap_or(&current.title);
    let content = edit.content.as_deref().unwrap_or(&current.content);
    validate_post_input(title, content)?;

    let images = match &edit.image {
        Some(path) => vec![Upload::image_from_path(Field::Image, path).await?],
        None => Vec::new(),
    };

    api.update_post(
        post_id,
        PostDraft {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            images,
        },
    )
    .await?;

    tracing::info!("Updated post {}", post_id);
    api.post(post_id).await
}
