use crate::error::AppError;
use crate::models::LoginData;
use crate::services::provider::BoardApi;
use crate::validation::validate_login_input;

pub async fn login(api: &dyn BoardApi, email: &str, password: &str) -> Result<LoginData, AppError> {
    validate_login_input(email, password)?;
    api.login(email.trim(), password.trim()).await
}

/// Log out. Succeeds even when the server could not be told.
pub async fn logout(api: &dyn BoardApi) -> Result<bool, AppError> {
    let acknowledged = api.logout().await?;
    if !acknowledged {
        tracing::warn!("Server did not acknowledge logout; local session cleared anyway");
    }
    Ok(acknowledged)
}
