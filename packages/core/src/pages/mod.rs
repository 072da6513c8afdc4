//! Page controllers.
//!
//! One module per screen of the board: each validates its input, drives the
//! [`BoardApi`] and hands back plain data for the renderer.

pub mod login;
pub mod password_edit;
pub mod post_create;
pub mod post_detail;
pub mod post_edit;
pub mod post_list;
pub mod profile_edit;
pub mod signup;

use crate::error::AppError;
use crate::services::provider::BoardApi;

/// Every page except login and signup needs a stored session.
pub async fn require_login(api: &dyn BoardApi) -> Result<(), AppError> {
    if api.is_logged_in().await {
        Ok(())
    } else {
        Err(AppError::NotLoggedIn)
    }
}
