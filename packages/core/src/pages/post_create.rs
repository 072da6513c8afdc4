use std::path::PathBuf;

use crate::error::AppError;
use crate::models::CreatedPost;
use crate::services::provider::{BoardApi, PostDraft};
use crate::services::upload::Upload;
use crate::validation::{validate_post_input, Field};

#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub images: Vec<PathBuf>,
}

/// Read every attached image, rejecting the whole form if any is not an image.
pub async fn read_images(paths: &[PathBuf]) -> Result<Vec<Upload>, AppError> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        uploads.push(Upload::image_from_path(Field::Image, path).await?);
    }
    Ok(uploads)
}

pub async fn create_post(api: &dyn BoardApi, form: &PostForm) -> Result<CreatedPost, AppError> {
    validate_post_input(&form.title, &form.content)?;
    let images = read_images(&form.images).await?;

    let created = api
        .create_post(PostDraft {
            title: form.title.trim().to_string(),
            content: form.content.trim().to_string(),
            images,
        })
        .await?;

    tracing::info!("Created post {}", created.post_id);
    Ok(created)
}
