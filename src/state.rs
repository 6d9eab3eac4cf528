//! Shared application state.

use std::sync::Arc;

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

use crate::audit::{self, AuditReporter};
use crate::config::Config;
use crate::image::{ImageStorage, LocalImageStorage};

/// Application state shared across all request handlers.
///
/// Everything in here is immutable after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    storage: Arc<dyn ImageStorage>,
    audit: Arc<dyn AuditReporter>,
    templates: Arc<Tera>,
}

impl AppState {
    /// Initialize application state: create the uploads directory, load
    /// templates, and wire up the audit reporter.
    pub async fn new(config: &Config) -> Result<Self> {
        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .context("failed to create uploads directory")?;

        let storage = Arc::new(LocalImageStorage::new(&config.upload_dir));
        let audit = audit::from_config(config);
        let templates = Arc::new(load_templates(config)?);

        Ok(Self {
            config: Arc::new(config.clone()),
            storage,
            audit,
            templates,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &dyn ImageStorage {
        self.storage.as_ref()
    }

    pub fn audit(&self) -> &dyn AuditReporter {
        self.audit.as_ref()
    }

    pub fn templates(&self) -> &Tera {
        &self.templates
    }
}

/// Load Tera templates from the configured directory.
fn load_templates(config: &Config) -> Result<Tera> {
    let pattern = config.templates_dir.join("**/*.html");
    let pattern_str = pattern.to_str().context("invalid templates directory path")?;

    let tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;

    let count = tera.get_template_names().count();
    debug!(count, "loaded templates");

    Ok(tera)
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish()
    }
}
