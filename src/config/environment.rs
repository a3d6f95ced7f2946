// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration for the dashboard process

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use tracing::info;

use super::backend::BaseUrlSource;
use crate::constants::{env_config, env_vars};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the dashboard binds to
    pub host: String,
    /// Dashboard HTTP port
    pub http_port: u16,
    /// Log level
    pub log_level: String,
    /// Deployment environment (development, staging, production)
    pub environment: String,
    /// Fixed backend base URL; `None` follows the workspace rule
    pub api_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// Does not read `.env`; the binary loads it once at startup.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = ServerConfig {
            host: env_config::host(),
            http_port: env_var_or(env_vars::HTTP_PORT, "3000")?
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: env_var_or("RUST_LOG", "info")?,
            environment: env_var_or("ENVIRONMENT", "development")?,
            api_url: env::var(env_vars::API_URL_OVERRIDE)
                .ok()
                .filter(|url| !url.trim().is_empty()),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow::anyhow!("HTTP_PORT cannot be 0"));
        }

        if self.host.trim().is_empty() {
            return Err(anyhow::anyhow!("HOST cannot be empty"));
        }

        if let Some(url) = &self.api_url {
            url::Url::parse(url).with_context(|| format!("Invalid FITNESS_API_URL: {}", url))?;
        }

        Ok(())
    }

    /// Socket address to serve the dashboard on
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid HOST value: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.http_port))
    }

    /// Where the API client takes its base URL from
    pub fn base_url_source(&self) -> BaseUrlSource {
        BaseUrlSource::from_override(self.api_url.clone())
    }

    /// Get a summary of the configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "OctoFit Dashboard Configuration:\n\
             - Listen: {}:{}\n\
             - Log Level: {}\n\
             - Environment: {}\n\
             - Backend: {}",
            self.host,
            self.http_port,
            self.log_level,
            self.environment,
            match &self.api_url {
                Some(url) => format!("fixed ({})", url),
                None => "workspace rule".to_string(),
            }
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            http_port: 3000,
            log_level: "info".to_string(),
            environment: "development".to_string(),
            api_url: None,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();
        assert!(config.validate().is_ok());

        config.http_port = 0;
        assert!(config.validate().is_err());

        config.http_port = 3000;
        config.host = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let mut config = config();
        config.api_url = Some("not a url".to_string());
        assert!(config.validate().is_err());

        config.api_url = Some("http://localhost:9000".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = config();
        let addr = config.bind_addr().unwrap();
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_base_url_source_follows_override() {
        let mut config = config();
        assert_eq!(config.base_url_source(), BaseUrlSource::Environment);

        config.api_url = Some("http://localhost:9000".to_string());
        assert_eq!(
            config.base_url_source(),
            BaseUrlSource::Fixed("http://localhost:9000".to_string())
        );
    }

    #[test]
    fn test_summary_mentions_backend_mode() {
        let summary = config().summary();
        assert!(summary.contains("127.0.0.1:3000"));
        assert!(summary.contains("workspace rule"));
    }
}
