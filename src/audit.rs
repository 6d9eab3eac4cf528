//! Audit event reporting.
//!
//! Auth failures and rejected uploads are reported through a narrow
//! [`AuditReporter`] interface so the transport (Rollbar today) stays out
//! of the request handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::config::Config;

/// Severity of an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Warning,
}

impl AuditLevel {
    fn as_str(self) -> &'static str {
        match self {
            AuditLevel::Info => "info",
            AuditLevel::Warning => "warning",
        }
    }
}

/// Audit event sink.
#[async_trait]
pub trait AuditReporter: Send + Sync {
    /// Report a single audit message. Must never fail the request; transport
    /// errors are logged and swallowed.
    async fn report(&self, level: AuditLevel, message: &str);
}

/// Reporter that only emits tracing events.
pub struct TracingReporter;

#[async_trait]
impl AuditReporter for TracingReporter {
    async fn report(&self, level: AuditLevel, message: &str) {
        match level {
            AuditLevel::Info => info!(audit = true, "{message}"),
            AuditLevel::Warning => warn!(audit = true, "{message}"),
        }
    }
}

/// Reporter that posts each event to the Rollbar item API.
pub struct RollbarReporter {
    client: reqwest::Client,
    token: String,
    environment: String,
}

impl RollbarReporter {
    pub fn new(token: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            environment: environment.into(),
        }
    }
}

#[async_trait]
impl AuditReporter for RollbarReporter {
    async fn report(&self, level: AuditLevel, message: &str) {
        // Mirror the event locally so operators see it without Rollbar.
        TracingReporter.report(level, message).await;

        let payload = json!({
            "access_token": self.token,
            "data": {
                "environment": self.environment,
                "level": level.as_str(),
                "body": { "message": { "body": message } },
            }
        });

        let result = self
            .client
            .post("https://api.rollbar.com/api/1/item/")
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(resp) if !resp.status().is_success() => {
                warn!(status = %resp.status(), "rollbar rejected audit event");
            }
            Err(e) => warn!(error = %e, "failed to deliver audit event"),
            Ok(_) => {}
        }
    }
}

/// Build the reporter configured for this process.
pub fn from_config(config: &Config) -> Arc<dyn AuditReporter> {
    match &config.rollbar_token {
        Some(token) => Arc::new(RollbarReporter::new(token, &config.environment)),
        None => Arc::new(TracingReporter),
    }
}

impl std::fmt::Debug for RollbarReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollbarReporter")
            .field("environment", &self.environment)
            .finish()
    }
}
