//! Wire types exchanged with the board API.
//!
//! The API wraps every payload in an [`Envelope`] and reports failures with
//! an [`ErrorBody`]. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Standard response wrapper: `{ status, message, data }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// A single validation failure reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

/// Body of a non-2xx response.
///
/// Validation failures (400) come back as `errors`, conflicts (409) as a
/// single `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
    #[serde(default)]
    pub error: Option<FieldError>,
}

impl ErrorBody {
    /// All field errors, folding the single `error` form into the list.
    pub fn into_field_errors(self) -> Vec<FieldError> {
        let mut errors = self.errors;
        if let Some(single) = self.error {
            errors.push(single);
        }
        errors
    }
}

// ---- auth -------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub password_check: String,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub password_check: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    pub nickname: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

// ---- posts ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub user_id: i64,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl Author {
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or("anonymous")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub post_id: i64,
    pub title: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostImage {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub post_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub images: Vec<PostImage>,
    #[serde(default)]
    pub liked_by_me: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page: u32,
    #[serde(default)]
    pub size: Option<u32>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostPage {
    #[serde(default)]
    pub content: Vec<PostSummary>,
    pub pageable: Pageable,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPost {
    pub post_id: i64,
}

// ---- comments & likes ---------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub content: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LikeStatus {
    #[serde(default)]
    pub liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_data_parses_camel_case() {
        let raw = r#"{"token":"t","refreshToken":"r","userId":7,"nickname":"kim"}"#;
        let data: LoginData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.refresh_token, "r");
        assert_eq!(data.user_id, 7);
        assert!(data.profile_image_url.is_none());
    }

    #[test]
    fn error_body_folds_single_error_into_list() {
        let raw = r#"{"message":"conflict","error":{"field":"email","message":"taken"}}"#;
        let body: ErrorBody = serde_json::from_str(raw).unwrap();
        let errors = body.into_field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field.as_deref(), Some("email"));
    }

    #[test]
    fn post_page_tolerates_missing_counters() {
        let raw = r#"{
            "content": [{"postId": 1, "title": "hello"}],
            "pageable": {"page": 1, "totalPages": 3}
        }"#;
        let page: PostPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.content[0].likes, 0);
        assert_eq!(page.pageable.total_pages, 3);
    }
}
