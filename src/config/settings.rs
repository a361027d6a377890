//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, DEFAULT_DATABASE_URL,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_EXPIRATION_HOURS, DEFAULT_UPLOAD_DIR, MIN_SESSION_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    session_secret: String,
    pub session_expiration_hours: i64,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub admin_username: String,
    admin_password: String,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("session_secret", &"[REDACTED]")
            .field("session_expiration_hours", &self.session_expiration_hours)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the database
    /// and the session secret.
    ///
    /// # Errors
    /// Returns a config error if the secret is shorter than the minimum length.
    pub fn new(database_url: impl Into<String>, session_secret: impl Into<String>) -> AppResult<Self> {
        let session_secret = session_secret.into();
        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(AppError::Config(format!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: database_url.into(),
            session_secret,
            session_expiration_hours: DEFAULT_SESSION_EXPIRATION_HOURS,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        })
    }

    /// Load configuration from environment variables (and `.env`).
    ///
    /// The session secret is required: it is never generated, so sessions
    /// survive restarts.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| AppError::Config("SESSION_SECRET environment variable must be set".into()))?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let mut config = Self::new(database_url, session_secret)?;

        if let Some(hours) = parse_var("SESSION_EXPIRATION_HOURS") {
            config.session_expiration_hours = hours;
        }
        if let Ok(dir) = env::var("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(limit) = parse_var("MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = limit;
        }
        if let Ok(username) = env::var("ADMIN_USERNAME") {
            config.admin_username = username;
        }
        if let Ok(password) = env::var("ADMIN_PASSWORD") {
            config.admin_password = password;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = parse_var("SERVER_PORT") {
            config.server_port = port;
        }

        Ok(config)
    }

    /// Override the upload directory.
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// Get session secret bytes for token signing/verification.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }

    /// Plain-text password for the bootstrap administrator.
    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new("sqlite::memory:", "short");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_defaults() {
        let config = Config::new("sqlite::memory:", SECRET).unwrap();
        assert_eq!(config.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("postgres://user:pw@db/app", SECRET).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains(SECRET));
        assert!(!debug.contains("admin123"));
        assert!(!debug.contains("pw@db"));
    }
}
