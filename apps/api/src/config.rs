use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON vocabulary file; the built-in vocabulary is used when unset.
    pub skill_vocabulary_path: Option<PathBuf>,
    /// Longest accepted CV or job text, in bytes.
    pub max_text_bytes: usize,
    pub max_batch_jobs: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_vocabulary_path: optional_env("SKILL_VOCABULARY_PATH").map(PathBuf::from),
            max_text_bytes: parse_env("MAX_TEXT_BYTES", 100_000)?,
            max_batch_jobs: parse_env("MAX_BATCH_JOBS", 50)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            skill_vocabulary_path: None,
            max_text_bytes: 100_000,
            max_batch_jobs: 50,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
