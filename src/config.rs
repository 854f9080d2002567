//! Configuration management for the dashboard.
//!
//! This module loads the settings the dashboard needs from the process
//! environment. Values can also come from `.env` files, which are read once at
//! startup and never override variables that are already set:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory
//!
//! Nothing here is validated. A missing value is simply absent from
//! [`Settings`] and only becomes an error when a consumer needs it.

use std::{env, path::PathBuf};

/// Address the HTTP server binds to when `SERVER_ADDRESS` is not set.
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8501";

/// Immutable record of everything read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub host_url: Option<String>,
    pub spotify_user_id: Option<String>,
    pub spotify_username: Option<String>,
    pub spotify_password: Option<String>,
    pub blob_storage_connection_string: Option<String>,
    pub login_required: bool,
    pub app_username: Option<String>,
    pub app_password: Option<String>,
    pub server_address: String,
}

impl Settings {
    /// Builds settings from an arbitrary key lookup.
    ///
    /// [`load_settings`] passes the process environment. Tests pass a map,
    /// which avoids mutating the environment of the test process.
    ///
    /// # Example
    ///
    /// ```
    /// let settings = Settings::from_lookup(|key| match key {
    ///     "APP_USERNAME" => Some("u".to_string()),
    ///     _ => None,
    /// });
    /// assert!(settings.login_required);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            client_id: lookup("client_id"),
            client_secret: lookup("client_secret"),
            host_url: lookup("host_url"),
            spotify_user_id: lookup("spotify_user_id"),
            spotify_username: lookup("spotify_username"),
            spotify_password: lookup("spotify_password"),
            blob_storage_connection_string: lookup("blob_storage_connection_string"),
            login_required: parse_login_required(lookup("LOGIN_REQUIRED").as_deref()),
            app_username: lookup("APP_USERNAME"),
            app_password: lookup("APP_PASSWORD"),
            server_address: lookup("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        }
    }
}

/// Reads the dashboard settings from the process environment.
///
/// Has no side effects beyond environment reads. Call [`load_env`] first if
/// `.env` files should be taken into account.
pub fn load_settings() -> Settings {
    Settings::from_lookup(|key| env::var(key).ok())
}

/// Parses the textual `LOGIN_REQUIRED` flag.
///
/// Accepts `True`/`False` in any letter case as well as `1`/`0` and
/// `yes`/`no`. An absent or unrecognised value keeps the gate enabled.
pub fn parse_login_required(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        None => true,
        Some(v) => match v.as_str() {
            "false" | "0" | "no" => false,
            "true" | "1" | "yes" => true,
            _ => {
                crate::warning!(
                    "LOGIN_REQUIRED has unrecognised value '{}', keeping login enabled",
                    v
                );
                true
            }
        },
    }
}

/// Loads environment variables from `.env` files.
///
/// Reads `./.env` first and then `spotdash/.env` inside the platform-specific
/// local data directory, creating that directory if needed so the template
/// copied by the build script has somewhere to live:
/// - Linux: `~/.local/share/spotdash/.env`
/// - macOS: `~/Library/Application Support/spotdash/.env`
/// - Windows: `%LOCALAPPDATA%/spotdash/.env`
///
/// Missing files are not an error.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    let path = data_env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn data_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotdash/.env");
    path
}
