use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::pages::post_list::DEFAULT_PAGE_SIZE;
use crate::session::default_session_path;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub page_size: u32,
    pub sample_fallback: bool,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let api_url = lookup("BOARD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_file = match lookup("BOARD_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_path()
                .ok_or("BOARD_SESSION_FILE is required when no home directory is available")?,
        };

        let page_size = match lookup("BOARD_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        let sample_fallback = match lookup("BOARD_SAMPLE_FALLBACK") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| format!("Invalid BOARD_SAMPLE_FALLBACK: {}", raw))?,
            None => false,
        };

        let http_timeout = match lookup("BOARD_HTTP_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| "BOARD_HTTP_TIMEOUT_SECONDS must be a valid number")?,
            None => DEFAULT_HTTP_TIMEOUT_SECONDS,
        };

        Ok(Self {
            api_url,
            session_file,
            page_size,
            sample_fallback,
            http_timeout: Duration::from_secs(http_timeout),
        })
    }

    /// Command-line flags win over the environment.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api_url = api_url.clone();
        }
        if let Some(session_file) = &cli.session_file {
            self.session_file = session_file.clone();
        }
        if cli.sample_fallback {
            self.sample_fallback = true;
        }
    }
}

fn parse_page_size(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(format!("BOARD_PAGE_SIZE must be a positive number, got {}", raw)),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
