//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Shared secret required in the `X-Api-Key` header for uploads.
    pub api_key: String,

    /// Rollbar access token for audit reporting. When None, audit events
    /// are only logged locally.
    pub rollbar_token: Option<String>,

    /// Environment name reported with audit events (default: development).
    pub environment: String,

    /// Flat directory holding all uploaded images (default: ./uploads).
    pub upload_dir: PathBuf,

    /// Path to Tera templates (default: ./templates).
    pub templates_dir: PathBuf,

    /// Allowed upload extensions, lowercase with leading dot.
    pub allowed_extensions: Vec<String>,

    /// Maximum request body size in bytes (default: 20 MB).
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let api_key = env::var("API_KEY").context("API_KEY environment variable is required")?;

        let rollbar_token = env::var("ROLLBAR_TOKEN").ok().filter(|t| !t.is_empty());

        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./uploads"));

        let templates_dir = env::var("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .map(|v| parse_extensions(&v))
            .unwrap_or_else(|_| parse_extensions(".jpg,.png,.gif"));

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "20000000".to_string())
            .parse()
            .context("MAX_UPLOAD_BYTES must be a valid usize")?;

        Ok(Self {
            port,
            api_key,
            rollbar_token,
            environment,
            upload_dir,
            templates_dir,
            allowed_extensions,
            max_upload_bytes,
        })
    }

    /// Whether the given extension (lowercase, leading dot) may be uploaded.
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        self.allowed_extensions.iter().any(|a| a == ext)
    }
}

/// Parse a comma-separated extension list, normalizing each entry to
/// lowercase with a leading dot.
fn parse_extensions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| {
            if s.starts_with('.') {
                s
            } else {
                format!(".{s}")
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions_normalizes() {
        let exts = parse_extensions(".jpg, PNG ,gif");
        assert_eq!(exts, vec![".jpg", ".png", ".gif"]);
    }

    #[test]
    fn test_parse_extensions_skips_empty_entries() {
        let exts = parse_extensions(".jpg,,.,  ,.png");
        assert_eq!(exts, vec![".jpg", ".png"]);
    }
}
