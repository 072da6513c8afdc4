//! HTTP client for the board API.
//!
//! Every authenticated call goes through [`BoardClient::authorized`], which
//! attaches the bearer token and, when the server answers 401, renews the
//! token pair once and replays the request once. A request that is still
//! rejected, or a refresh that fails, ends the session.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::{
    Comment, CommentPage, CommentRequest, CreatedPost, Envelope, ErrorBody, LikeStatus, LoginData,
    LoginRequest, PasswordChange, PostDetail, PostPage, RefreshRequest, SignupRequest, TokenPair,
    UserProfile,
};
use crate::services::provider::{ApiResult, BoardApi, PostDraft, ProfileUpdate};
use crate::services::upload::Upload;
use crate::session::{CurrentUser, Session, SessionStore};

const LOGIN_REJECTED_MESSAGE: &str = "Email or password does not match.";

/// Request body, kept in a replayable form.
enum Payload {
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

impl Payload {
    fn json<T: Serialize>(body: &T) -> Result<Self, AppError> {
        serde_json::to_value(body)
            .map(Payload::Json)
            .map_err(|err| AppError::Parse(err.to_string()))
    }
}

/// Multipart fields are rebuilt into a fresh `Form` on every send, since a
/// `Form` is consumed by the request that carries it.
#[derive(Default)]
struct MultipartBody {
    fields: Vec<(&'static str, String)>,
    files: Vec<(&'static str, Upload)>,
}

impl MultipartBody {
    fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    fn file(mut self, name: &'static str, upload: Upload) -> Self {
        self.files.push((name, upload));
        self
    }

    fn to_form(&self) -> Result<Form, AppError> {
        let mut form = Form::new();
        for (name, value) in &self.fields {
            form = form.text(*name, value.clone());
        }
        for (name, upload) in &self.files {
            form = form.part(*name, upload.to_part()?);
        }
        Ok(form)
    }
}

impl From<PostDraft> for MultipartBody {
    fn from(draft: PostDraft) -> Self {
        draft.images.into_iter().fold(
            MultipartBody::default()
                .text("title", draft.title)
                .text("content", draft.content),
            |body, image| body.file("images", image),
        )
    }
}

pub struct BoardClient {
    base_url: String,
    http: Client,
    session: Mutex<SessionStore>,
    // Held for the whole refresh round trip so concurrent 401s renew once.
    refresh_gate: Mutex<()>,
}

impl BoardClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self::with_http(base_url, session, Client::new())
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        session: SessionStore,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("cannot build HTTP client: {}", err)))?;
        Ok(Self::with_http(base_url, session, http))
    }

    fn with_http(base_url: impl Into<String>, session: SessionStore, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            session: Mutex::new(session),
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the stored session.
    pub async fn session(&self) -> Session {
        self.session.lock().await.session().clone()
    }

    /// Exchange a refresh token for a new token pair. Does not touch the
    /// stored session.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> ApiResult<TokenPair> {
        let payload = Payload::json(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        let response = self.dispatch(&Method::POST, "/refresh", &payload, None).await?;
        read_data(response).await
    }

    async fn current_token(&self) -> Option<String> {
        self.session.lock().await.token().map(str::to_owned)
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        payload: &Payload,
        token: Option<&str>,
    ) -> Result<Response, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(body),
            Payload::Multipart(body) => request.multipart(body.to_form()?),
        };

        let response = request.send().await.map_err(|err| {
            tracing::warn!("{} {} failed: {}", method, path, err);
            AppError::Network(err.to_string())
        })?;

        tracing::debug!("{} {} -> {}", method, path, response.status());
        Ok(response)
    }

    /// Send with the stored bearer token, renewing it once on 401.
    async fn authorized(&self, method: Method, path: &str, payload: Payload) -> ApiResult<Response> {
        let token = self.current_token().await;
        let response = self.dispatch(&method, path, &payload, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::info!("{} {} returned 401; renewing session", method, path);
        if !self.renew_session(token.as_deref()).await {
            return Err(self.expire_session().await);
        }

        let token = self.current_token().await;
        let retry = self.dispatch(&method, path, &payload, token.as_deref()).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("{} {} still unauthorized after renewal", method, path);
            return Err(self.expire_session().await);
        }
        Ok(retry)
    }

    /// Returns `true` when a usable token is stored afterwards.
    async fn renew_session(&self, rejected: Option<&str>) -> bool {
        let _gate = self.refresh_gate.lock().await;

        let refresh_token = {
            let session = self.session.lock().await;
            if let Some(current) = session.token() {
                if Some(current) != rejected {
                    tracing::debug!("Session was renewed by a concurrent request");
                    return true;
                }
            }
            match session.refresh_token() {
                Some(token) => token.to_owned(),
                None => {
                    tracing::info!("No refresh token stored");
                    return false;
                }
            }
        };

        match self.refresh_tokens(&refresh_token).await {
            Ok(pair) => match self.session.lock().await.set_tokens(&pair) {
                Ok(()) => {
                    tracing::info!("Session renewed");
                    true
                }
                Err(err) => {
                    tracing::error!("Failed to store renewed tokens: {}", err);
                    false
                }
            },
            Err(err) => {
                tracing::warn!("Token refresh failed: {}", err);
                false
            }
        }
    }

    /// Best-effort server logout, then wipe the local session.
    async fn expire_session(&self) -> AppError {
        tracing::warn!("Session expired; logging out");
        if let Some(token) = self.current_token().await {
            self.notify_logout(&token).await;
        }
        if let Err(err) = self.session.lock().await.clear() {
            tracing::error!("Failed to clear session: {}", err);
        }
        AppError::SessionExpired
    }

    async fn notify_logout(&self, token: &str) -> bool {
        match self
            .dispatch(&Method::POST, "/users/logout", &Payload::Empty, Some(token))
            .await
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!("Logout returned HTTP {}", response.status());
                false
            }
            Err(err) => {
                tracing::warn!("Logout request failed: {}", err);
                false
            }
        }
    }

    async fn expect_success(&self, method: Method, path: &str, payload: Payload) -> ApiResult<()> {
        let response = self.authorized(method, path, payload).await?;
        ensure_success(response).await.map(|_| ())
    }
}

/// Turn a non-2xx response into an [`AppError::Api`].
async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(rejection(status, response).await)
}

async fn rejection(status: StatusCode, response: Response) -> AppError {
    let raw = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&raw).unwrap_or_default();

    let message = body
        .error
        .as_ref()
        .map(|err| err.message.clone())
        .or_else(|| body.message.clone())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    AppError::Api {
        status: status.as_u16(),
        message,
        errors: body.into_field_errors(),
    }
}

async fn read_data<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let response = ensure_success(response).await?;
    let envelope = response
        .json::<Envelope<T>>()
        .await
        .map_err(|err| AppError::Parse(err.to_string()))?;
    envelope
        .data
        .ok_or_else(|| AppError::Parse("response has no `data` field".to_string()))
}

#[async_trait]
impl BoardApi for BoardClient {
    async fn current_user(&self) -> CurrentUser {
        self.session.lock().await.current_user()
    }

    async fn is_logged_in(&self) -> bool {
        self.session.lock().await.is_logged_in()
    }

    async fn signup(&self, form: &SignupRequest, profile_image: Option<Upload>) -> ApiResult<()> {
        let payload = match profile_image {
            None => Payload::json(form)?,
            Some(image) => Payload::Multipart(
                MultipartBody::default()
                    .text("email", form.email.clone())
                    .text("password", form.password.clone())
                    .text("passwordCheck", form.password_check.clone())
                    .text("nickname", form.nickname.clone())
                    .file("profileImage", image),
            ),
        };

        let response = self
            .dispatch(&Method::POST, "/users/signup", &payload, None)
            .await?;
        ensure_success(response).await?;
        tracing::info!("Signed up {}", form.email);
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginData> {
        let payload = Payload::json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response = self
            .dispatch(&Method::POST, "/users/login", &payload, None)
            .await?;

        let login: LoginData = match read_data(response).await {
            Ok(login) => login,
            Err(AppError::Api { status: 401, errors, .. }) => {
                return Err(AppError::Api {
                    status: 401,
                    message: LOGIN_REJECTED_MESSAGE.to_string(),
                    errors,
                })
            }
            Err(AppError::Api {
                status: 400,
                message,
                errors,
            }) => {
                let message = errors
                    .first()
                    .map(|err| err.message.clone())
                    .unwrap_or(message);
                return Err(AppError::Api {
                    status: 400,
                    message,
                    errors,
                });
            }
            Err(err) => return Err(err),
        };

        self.session.lock().await.set_login(&login)?;
        tracing::info!("Logged in as {} (user {})", login.nickname, login.user_id);
        Ok(login)
    }

    async fn logout(&self) -> ApiResult<bool> {
        let acknowledged = match self.current_token().await {
            Some(token) => self.notify_logout(&token).await,
            None => false,
        };
        self.session.lock().await.clear()?;
        Ok(acknowledged)
    }

    async fn profile(&self) -> ApiResult<UserProfile> {
        let response = self
            .authorized(Method::GET, "/users/profile", Payload::Empty)
            .await?;
        let profile: UserProfile = read_data(response).await?;
        self.session.lock().await.set_profile(&profile)?;
        Ok(profile)
    }

    async fn update_profile(&self, update: ProfileUpdate) -> ApiResult<UserProfile> {
        let mut body = MultipartBody::default();
        if let Some(nickname) = update.nickname {
            body = body.text("nickname", nickname);
        }
        if let Some(image) = update.profile_image {
            body = body.file("profileImage", image);
        }

        let response = self
            .authorized(Method::PUT, "/users/profile", Payload::Multipart(body))
            .await?;
        let profile: UserProfile = read_data(response).await?;
        self.session.lock().await.set_profile(&profile)?;
        Ok(profile)
    }

    async fn change_password(&self, change: &PasswordChange) -> ApiResult<()> {
        self.expect_success(Method::PUT, "/users/password", Payload::json(change)?)
            .await
    }

    async fn withdraw(&self) -> ApiResult<()> {
        self.expect_success(Method::DELETE, "/user", Payload::Empty)
            .await?;
        self.logout().await?;
        Ok(())
    }

    async fn list_posts(&self, page: u32, size: u32) -> ApiResult<PostPage> {
        let path = format!("/posts?page={}&size={}", page, size);
        let response = self.authorized(Method::GET, &path, Payload::Empty).await?;
        read_data(response).await
    }

    async fn post(&self, post_id: i64) -> ApiResult<PostDetail> {
        let path = format!("/posts/{}", post_id);
        let response = self.authorized(Method::GET, &path, Payload::Empty).await?;
        read_data(response).await
    }

    async fn create_post(&self, draft: PostDraft) -> ApiResult<CreatedPost> {
        let response = self
            .authorized(Method::POST, "/posts", Payload::Multipart(draft.into()))
            .await?;
        read_data(response).await
    }

    async fn update_post(&self, post_id: i64, draft: PostDraft) -> ApiResult<()> {
        let path = format!("/posts/{}", post_id);
        self.expect_success(Method::PUT, &path, Payload::Multipart(draft.into()))
            .await
    }

    async fn delete_post(&self, post_id: i64) -> ApiResult<()> {
        let path = format!("/posts/{}", post_id);
        self.expect_success(Method::DELETE, &path, Payload::Empty).await
    }

    async fn comments(&self, post_id: i64) -> ApiResult<Vec<Comment>> {
        let path = format!("/posts/{}/comments", post_id);
        let response = self.authorized(Method::GET, &path, Payload::Empty).await?;
        let page: CommentPage = read_data(response).await?;
        Ok(page.content)
    }

    async fn create_comment(&self, post_id: i64, content: &str) -> ApiResult<()> {
        let path = format!("/posts/{}/comments", post_id);
        let payload = Payload::json(&CommentRequest {
            content: content.to_string(),
        })?;
        self.expect_success(Method::POST, &path, payload).await
    }

    async fn update_comment(&self, comment_id: i64, content: &str) -> ApiResult<()> {
        let path = format!("/comments/{}", comment_id);
        let payload = Payload::json(&CommentRequest {
            content: content.to_string(),
        })?;
        self.expect_success(Method::PUT, &path, payload).await
    }

    async fn delete_comment(&self, comment_id: i64) -> ApiResult<()> {
        let path = format!("/comments/{}", comment_id);
        self.expect_success(Method::DELETE, &path, Payload::Empty).await
    }

    async fn like(&self, post_id: i64) -> ApiResult<()> {
        let path = format!("/posts/{}/like", post_id);
        self.expect_success(Method::POST, &path, Payload::Empty).await
    }

    async fn unlike(&self, post_id: i64) -> ApiResult<()> {
        let path = format!("/posts/{}/like", post_id);
        self.expect_success(Method::DELETE, &path, Payload::Empty).await
    }

    async fn like_status(&self, post_id: i64) -> ApiResult<bool> {
        let path = format!("/posts/{}/like/check", post_id);
        let response = self.authorized(Method::GET, &path, Payload::Empty).await?;
        let status: LikeStatus = read_data(response).await?;
        Ok(status.liked)
    }
}
