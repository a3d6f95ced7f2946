// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Backend addressing constants and environment-based defaults for the dashboard process.

/// Fitness backend addressing
pub mod backend {
    /// Port the fitness REST backend listens on, both locally and behind the workspace proxy
    pub const API_PORT: u16 = 8000;

    /// Domain the cloud workspace proxy publishes forwarded ports under
    pub const WORKSPACE_DOMAIN: &str = "app.github.dev";

    /// Base URL used when no cloud workspace is detected
    pub const LOCAL_BASE_URL: &str = "http://localhost:8000";

    /// Path prefix shared by every REST resource
    pub const API_PREFIX: &str = "api";
}

/// Names of environment variables read by the dashboard
pub mod env_vars {
    /// Names the current cloud workspace; its presence switches the backend to HTTPS
    pub const WORKSPACE_NAME: &str = "CODESPACE_NAME";

    /// Explicit backend base URL override for the dashboard process
    pub const API_URL_OVERRIDE: &str = "FITNESS_API_URL";

    pub const HOST: &str = "HOST";
    pub const HTTP_PORT: &str = "HTTP_PORT";
}

/// Environment-based configuration for the dashboard process
pub mod env_config {
    use std::env;

    /// Get dashboard bind host from environment or default
    pub fn host() -> String {
        env::var(super::env_vars::HOST).unwrap_or_else(|_| "127.0.0.1".to_string())
    }
}

/// Service identity used in logs and health responses
pub mod service {
    pub const SERVICE_NAME: &str = "octofit-dashboard";

    /// Version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

