use std::path::PathBuf;

use crate::error::AppError;
use crate::models::{FieldError, SignupRequest};
use crate::services::provider::BoardApi;
use crate::services::upload::Upload;
use crate::validation::{
    validate_email, validate_image_file, validate_nickname, validate_password,
    validate_password_check, Field, ValidationError,
};

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub password_check: String,
    pub nickname: String,
    pub profile_image: Option<PathBuf>,
}

impl SignupForm {
    /// Every failing field, in form order.
    pub fn problems(&self) -> Vec<ValidationError> {
        let mut checks = vec![
            validate_email(&self.email),
            validate_password(&self.password),
            validate_password_check(&self.password, &self.password_check),
            validate_nickname(&self.nickname),
        ];
        if let Some(path) = &self.profile_image {
            checks.push(validate_image_file(Field::ProfileImage, path));
        }
        checks.into_iter().filter_map(Result::err).collect()
    }

    fn to_request(&self) -> SignupRequest {
        SignupRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            password_check: self.password_check.clone(),
            nickname: self.nickname.trim().to_string(),
        }
    }
}

pub async fn signup(api: &dyn BoardApi, form: &SignupForm) -> Result<(), AppError> {
    if let Some(first) = form.problems().into_iter().next() {
        return Err(first.into());
    }

    let image = match &form.profile_image {
        Some(path) => Some(Upload::image_from_path(Field::ProfileImage, path).await?),
        None => None,
    };

    api.signup(&form.to_request(), image).await
}

/// Server-side messages keyed by the field they belong to, e.g. a duplicate
/// email or nickname reported with 409.
pub fn field_messages(err: &AppError) -> Vec<(String, String)> {
    err.field_errors()
        .iter()
        .map(|FieldError { field, message }| {
            (
                field.clone().unwrap_or_else(|| "form".to_string()),
                message.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_board::MockBoard;

    fn valid_form() -> SignupForm {
        SignupForm {
            email: "new@example.com".into(),
            password: "Passw0rd!".into(),
            password_check: "Passw0rd!".into(),
            nickname: "newbie".into(),
            profile_image: None,
        }
    }

    #[test]
    fn valid_form_has_no_problems() {
        assert!(valid_form().problems().is_empty());
    }

    #[test]
    fn problems_lists_every_bad_field() {
        let form = SignupForm {
            email: "bad".into(),
            password: "short".into(),
            password_check: "other".into(),
            nickname: "has space".into(),
            profile_image: Some(PathBuf::from("resume.pdf")),
        };
        let fields: Vec<Field> = form.problems().iter().map(|p| p.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Email,
                Field::Password,
                Field::PasswordCheck,
                Field::Nickname,
                Field::ProfileImage
            ]
        );
    }

    #[tokio::test]
    async fn signup_sends_trimmed_fields_without_image() {
        let api = MockBoard::new();
        let mut form = valid_form();
        form.nickname = " newbie ".into();

        signup(&api, &form).await.unwrap();

        let signups = api.signups();
        assert_eq!(signups.len(), 1);
        assert_eq!(signups[0].0.nickname, "newbie");
        assert!(signups[0].1.is_none());
    }

    #[tokio::test]
    async fn invalid_form_is_not_submitted() {
        let api = MockBoard::new();
        let mut form = valid_form();
        form.password_check = "different1!A".into();

        assert!(signup(&api, &form).await.is_err());
        assert!(api.signups().is_empty());
    }

    #[test]
    fn field_messages_labels_unscoped_errors() {
        let err = AppError::Api {
            status: 409,
            message: "duplicate".into(),
            errors: vec![
                FieldError {
                    field: Some("email".into()),
                    message: "email already in use".into(),
                },
                FieldError {
                    field: None,
                    message: "try again".into(),
                },
            ],
        };
        let messages = field_messages(&err);
        assert_eq!(messages[0], ("email".to_string(), "email already in use".to_string()));
        assert_eq!(messages[1].0, "form");
    }
}
