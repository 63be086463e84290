use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::inference::{InferenceSettings, DEFAULT_API_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub inference: InferenceSettings,
    /// Scratch directory where uploaded CVs are staged for the duration of
    /// one comparison. Not durable storage.
    pub cv_upload_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            inference: InferenceSettings {
                api_url: std::env::var("INFERENCE_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                api_key: require_env("INFERENCE_API_TOKEN")?,
                model: std::env::var("INFERENCE_MODEL")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                timeout_secs: std::env::var("INFERENCE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse::<u64>()
                    .context("INFERENCE_TIMEOUT_SECS must be a number of seconds")?,
                max_retries: std::env::var("INFERENCE_MAX_RETRIES")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse::<u32>()
                    .context("INFERENCE_MAX_RETRIES must be a non-negative integer")?,
            },
            cv_upload_dir: std::env::var("CV_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir().join("jobboard_cv")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
