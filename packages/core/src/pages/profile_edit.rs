use std::path::Path;

use crate::error::AppError;
use crate::models::UserProfile;
use crate::services::provider::{BoardApi, ProfileUpdate};
use crate::services::upload::Upload;
use crate::validation::{validate_nickname, Field, ValidationError};

pub async fn show_profile(api: &dyn BoardApi) -> Result<UserProfile, AppError> {
    api.profile().await
}

pub async fn update_profile(
    api: &dyn BoardApi,
    nickname: Option<&str>,
    image: Option<&Path>,
) -> Result<UserProfile, AppError> {
    if nickname.is_none() && image.is_none() {
        return Err(ValidationError::new(
            Field::Nickname,
            "Give a new nickname or a profile image.",
        )
        .into());
    }

    let nickname = match nickname {
        Some(nickname) => {
            validate_nickname(nickname)?;
            Some(nickname.trim().to_string())
        }
        None => None,
    };

    let profile_image = match image {
        Some(path) => Some(Upload::image_from_path(Field::ProfileImage, path).await?),
        None => None,
    };

    let profile = api
        .update_profile(ProfileUpdate {
            nickname,
            profile_image,
        })
        .await?;
    tracing::info!("Profile updated ({})", profile.nickname);
    Ok(profile)
}

/// Delete the account. The caller is expected to have confirmed.
pub async fn withdraw(api: &dyn BoardApi) -> Result<(), AppError> {
    api.withdraw().await?;
    tracing::info!("Account deleted");
    Ok(())
}
