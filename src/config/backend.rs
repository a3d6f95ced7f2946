// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Backend base-URL resolution
//!
//! The fitness backend is reached either through the cloud workspace port proxy
//! (`https://{workspace}-8000.app.github.dev`) or on the local development port.

use crate::constants::{backend, env_vars};
use std::env;

/// Where the client takes its backend base URL from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BaseUrlSource {
    /// Re-read the workspace variable on every call
    #[default]
    Environment,
    /// Always use this base URL
    Fixed(String),
}

impl BaseUrlSource {
    /// Resolve the base URL, without a trailing slash
    pub fn resolve(&self) -> String {
        match self {
            BaseUrlSource::Environment => {
                let workspace = env::var(env_vars::WORKSPACE_NAME).ok();
                resolve_base_url(workspace.as_deref())
            }
            BaseUrlSource::Fixed(url) => url.trim_end_matches('/').to_string(),
        }
    }

    /// Use a fixed override when one is configured, else follow the environment
    pub fn from_override(url: Option<String>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => BaseUrlSource::Fixed(url.trim().to_string()),
            _ => BaseUrlSource::Environment,
        }
    }
}

/// Compose the backend base URL for an optional workspace name
pub fn resolve_base_url(workspace: Option<&str>) -> String {
    match workspace.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!(
            "https://{}-{}.{}",
            name,
            backend::API_PORT,
            backend::WORKSPACE_DOMAIN
        ),
        None => backend::LOCAL_BASE_URL.to_string(),
    }
}
