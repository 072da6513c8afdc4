//! Persisted login state.
//!
//! The five values a browser would keep in local storage (token, refresh
//! token, user id, nickname, profile image URL) live in one JSON document.
//! Every mutation rewrites the whole document through a temp file and a
//! rename, so the token pair is never observed half-updated.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{LoginData, TokenPair, UserProfile};

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// Who is logged in, as far as the local state knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Option<i64>,
    pub nickname: Option<String>,
    pub profile_image_url: Option<String>,
}

/// File-backed session. Reads are served from memory; the file is only
/// touched on load and on mutation.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    session: Session,
}

/// Platform data directory location, e.g. `~/.local/share/board/session.json`.
pub fn default_session_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "board").map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
}

impl SessionStore {
    /// Load the session at `path`. A missing file is an empty session.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let session = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Session::default(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|err| {
                AppError::Storage(format!("corrupt session file {}: {}", path.display(), err))
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => Session::default(),
            Err(err) => {
                return Err(AppError::Storage(format!(
                    "cannot read {}: {}",
                    path.display(),
                    err
                )))
            }
        };

        tracing::debug!("Loaded session from {}", path.display());
        Ok(Self { path, session })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.session.refresh_token.as_deref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.session.user_id
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            user_id: self.session.user_id,
            nickname: self.session.nickname.clone(),
            profile_image_url: self.session.profile_image_url.clone(),
        }
    }

    /// Replace the whole session with the result of a login.
    pub fn set_login(&mut self, login: &LoginData) -> Result<(), AppError> {
        self.session = Session {
            token: Some(login.token.clone()),
            refresh_token: Some(login.refresh_token.clone()),
            user_id: Some(login.user_id),
            nickname: Some(login.nickname.clone()),
            profile_image_url: login.profile_image_url.clone(),
        };
        self.save()
    }

    pub fn set_tokens(&mut self, pair: &TokenPair) -> Result<(), AppError> {
        self.session.token = Some(pair.token.clone());
        self.session.refresh_token = Some(pair.refresh_token.clone());
        self.save()
    }

    /// Mirror the server's profile. A profile without an image URL keeps the
    /// one already stored.
    pub fn set_profile(&mut self, profile: &UserProfile) -> Result<(), AppError> {
        self.session.nickname = Some(profile.nickname.clone());
        if let Some(url) = &profile.profile_image_url {
            self.session.profile_image_url = Some(url.clone());
        }
        if let Some(id) = profile.user_id {
            self.session.user_id = Some(id);
        }
        self.save()
    }

    /// Forget everything and remove the file.
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.session = Session::default();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::Storage(format!(
                "cannot remove {}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    fn save(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    AppError::Storage(format!("cannot create {}: {}", parent.display(), err))
                })?;
            }
        }

        let body = serde_json::to_string_pretty(&self.session)
            .map_err(|err| AppError::Storage(err.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|err| {
                AppError::Storage(format!("cannot write {}: {}", self.path.display(), err))
            })
    }
}
