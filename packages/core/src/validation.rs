//! Client-side input checks run before any request leaves the machine.
//!
//! The server repeats every check (and adds uniqueness checks for email and
//! nickname); these only catch obvious mistakes early and produce the same
//! helper texts the forms show.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;
pub const NICKNAME_MAX_LEN: usize = 10;
pub const TITLE_MAX_LEN: usize = 26;

/// Characters accepted as the "special character" class of a password.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$")
        .expect("email pattern is a valid regex")
});

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    PasswordCheck,
    CurrentPassword,
    Nickname,
    ProfileImage,
    Title,
    Content,
    Image,
}

impl Field {
    /// Name used for this field in server error bodies.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordCheck => "passwordCheck",
            Field::CurrentPassword => "currentPassword",
            Field::Nickname => "nickname",
            Field::ProfileImage => "profileImage",
            Field::Title => "title",
            Field::Content => "content",
            Field::Image => "images",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("* {message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 8-20 characters with at least one upper-case letter, lower-case letter,
/// digit and special character.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return false;
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    has_upper && has_lower && has_digit && has_special
}

pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new(Field::Email, "Please enter your email."));
    }
    if !is_valid_email(email) {
        return Err(ValidationError::new(
            Field::Email,
            "Please enter a valid email address (e.g. example@example.com).",
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return Err(ValidationError::new(Field::Password, "Please enter your password."));
    }
    if !is_valid_password(password) {
        return Err(ValidationError::new(
            Field::Password,
            "Passwords must be 8 to 20 characters and contain at least one upper-case letter, \
             one lower-case letter, one digit and one special character.",
        ));
    }
    Ok(())
}

pub fn validate_password_check(password: &str, check: &str) -> ValidationResult {
    if check.is_empty() {
        return Err(ValidationError::new(
            Field::PasswordCheck,
            "Please enter your password once more.",
        ));
    }
    if password != check {
        return Err(ValidationError::new(Field::PasswordCheck, "Passwords do not match."));
    }
    Ok(())
}

pub fn validate_nickname(nickname: &str) -> ValidationResult {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(ValidationError::new(Field::Nickname, "Please enter a nickname."));
    }
    if nickname.chars().count() > NICKNAME_MAX_LEN {
        return Err(ValidationError::new(
            Field::Nickname,
            format!("Nicknames can be at most {NICKNAME_MAX_LEN} characters."),
        ));
    }
    if nickname.contains(' ') {
        return Err(ValidationError::new(Field::Nickname, "Please remove the spaces."));
    }
    Ok(())
}

/// Login only checks the email format and that a password was typed.
pub fn validate_login_input(email: &str, password: &str) -> ValidationResult {
    validate_email(email)?;
    if password.trim().is_empty() {
        return Err(ValidationError::new(Field::Password, "Please enter your password."));
    }
    Ok(())
}

pub fn validate_post_input(title: &str, content: &str) -> ValidationResult {
    let title = title.trim();
    if title.is_empty() || content.trim().is_empty() {
        return Err(ValidationError::new(
            Field::Content,
            "Please fill in both the title and the content.",
        ));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ValidationError::new(
            Field::Title,
            format!("Titles can be at most {TITLE_MAX_LEN} characters."),
        ));
    }
    Ok(())
}

pub fn is_image_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false)
}

pub fn validate_image_file(field: Field, path: &Path) -> ValidationResult {
    if !is_image_file(path) {
        return Err(ValidationError::new(field, "Only image files can be uploaded."));
    }
    Ok(())
}
