// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Logging configuration with structured output

use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::service::{SERVICE_NAME, SERVICE_VERSION};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human readable, multi-field output
    Pretty,
    /// Single-line output without targets
    Compact,
}

impl LogFormat {
    /// Parse the `LOG_FORMAT` value; anything unknown is `Pretty`
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            Some("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: SERVICE_NAME.to_string(),
            service_version: SERVICE_VERSION.to_string(),
            environment: "development".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let verbose = environment == "production";

        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(env::var("LOG_FORMAT").ok().as_deref()),
            include_location: verbose || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: verbose || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: verbose || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| SERVICE_VERSION.to_string()),
            environment,
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    pub fn init(&self) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let registry = tracing_subscriber::registry().with(env_filter);

        match self.format {
            LogFormat::Json => {
                let layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_writer(io::stdout)
                    .with_span_events(self.span_events())
                    .json();
                registry.with(layer).try_init()?;
            }
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_writer(io::stdout)
                    .with_span_events(self.span_events());
                registry.with(layer).try_init()?;
            }
            LogFormat::Compact => {
                let layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stdout);
                registry.with(layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "OctoFit dashboard starting up"
        );

        let features = json!({
            "location": self.include_location,
            "thread": self.include_thread,
            "spans": self.include_spans
        });
        debug!("Logging features: {}", features);
    }
}

/// Initialize logging from environment
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Application-specific logging utilities
pub struct AppLogger;

impl AppLogger {
    /// Log a completed call against the fitness backend
    pub fn log_backend_request(method: &str, url: &str, status: Option<u16>, duration_ms: u64) {
        match status {
            Some(status) if (200..300).contains(&status) => info!(
                http.method = %method,
                http.url = %url,
                http.status = %status,
                http.duration_ms = %duration_ms,
                "Backend request"
            ),
            Some(status) => warn!(
                http.method = %method,
                http.url = %url,
                http.status = %status,
                http.duration_ms = %duration_ms,
                "Backend request rejected"
            ),
            None => warn!(
                http.method = %method,
                http.url = %url,
                http.duration_ms = %duration_ms,
                "Backend request failed before a response arrived"
            ),
        }
    }

    /// Log a list view changing state
    pub fn log_view_transition(resource: &str, state: &str, records: usize) {
        debug!(
            view.resource = %resource,
            view.state = %state,
            view.records = %records,
            "View state changed"
        );
    }

    /// Log user edit form events
    pub fn log_edit_event(user_id: &str, event: &str, success: bool, details: Option<&str>) {
        info!(
            user.id = %user_id,
            edit.event = %event,
            edit.success = %success,
            edit.details = details.unwrap_or(""),
            "User edit event"
        );
    }
}
