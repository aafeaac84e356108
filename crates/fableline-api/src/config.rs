//! Environment configuration.

use std::str::FromStr;

use fableline_core::id::StoryId;

use crate::error::AppError;

/// Server configuration read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// PostgreSQL connection string. Required.
    pub database_url: String,
    /// Bind host, default `0.0.0.0`.
    pub host: String,
    /// Bind port, default `3000`.
    pub port: u16,
    /// Story used when a session references no story or an unknown one.
    pub default_story: StoryId,
    /// Per-caller inbound-call limit per window.
    pub call_limit: u32,
    /// Per-caller digit-press limit per window.
    pub digit_limit: u32,
    /// Rate-limit window in seconds.
    pub limit_window_secs: i64,
    /// Maximum callers tracked by the rate limiter.
    pub limiter_capacity: usize,
    /// Bearer token gating `/debug`; the endpoint is disabled when unset.
    pub debug_token: Option<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if `DATABASE_URL` is missing or any
    /// numeric variable fails to parse.
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL environment variable must be set".into()))?;

        Ok(Self {
            database_url,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned()),
            port: parsed_var("PORT", 3000)?,
            default_story: StoryId::new(
                std::env::var("DEFAULT_STORY").unwrap_or_else(|_| "mystic-forest".to_owned()),
            ),
            call_limit: parsed_var("RATE_LIMIT_CALLS", 20)?,
            digit_limit: parsed_var("RATE_LIMIT_DIGITS", 30)?,
            limit_window_secs: parsed_var("RATE_LIMIT_WINDOW_SECS", 60)?,
            limiter_capacity: parsed_var("RATE_LIMIT_CAPACITY", 1024)?,
            debug_token: std::env::var("DEBUG_AUTH_TOKEN").ok(),
        })
    }
}

/// Parses an optional environment variable, falling back to `default`.
fn parsed_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{name} must be valid: {e}"))),
        Err(_) => Ok(default),
    }
}
