use crate::error::AppError;
use crate::models::PasswordChange;
use crate::services::provider::BoardApi;
use crate::validation::{validate_password, validate_password_check, Field, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    pub current: String,
    pub new: String,
    pub check: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.current.is_empty() {
            return Err(ValidationError::new(
                Field::CurrentPassword,
                "Please enter your current password.",
            ));
        }
        validate_password(&self.new)?;
        validate_password_check(&self.new, &self.check)
    }
}

pub async fn change_password(api: &dyn BoardApi, form: &PasswordForm) -> Result<(), AppError> {
    form.validate()?;
    api.change_password(&PasswordChange {
        current_password: form.current.clone(),
        new_password: form.new.clone(),
        password_check: form.check.clone(),
    })
    .await?;
    tracing::info!("Password changed");
    Ok(())
}
