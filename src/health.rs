// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Liveness and readiness probes for the dashboard process

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::warn;

use crate::client::FitnessApi;
use crate::constants::service;
use crate::models::Resource;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: ServiceInfo,
    pub checks: Vec<ComponentHealth>,
    /// Unix seconds
    pub timestamp: u64,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: String,
    pub duration_ms: u64,
}

pub struct HealthChecker {
    start_time: Instant,
    api: Arc<dyn FitnessApi>,
    environment: String,
}

impl HealthChecker {
    pub fn new(api: Arc<dyn FitnessApi>, environment: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            api,
            environment: environment.into(),
        }
    }

    fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            name: service::SERVICE_NAME.to_string(),
            version: service::SERVICE_VERSION.to_string(),
            environment: self.environment.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    fn respond(&self, started: Instant, checks: Vec<ComponentHealth>) -> HealthResponse {
        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        HealthResponse {
            status,
            service: self.service_info(),
            checks,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            response_time_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Process is up; never touches the backend
    pub async fn basic_health(&self) -> HealthResponse {
        let started = Instant::now();
        self.respond(
            started,
            vec![ComponentHealth {
                name: "service".to_string(),
                status: HealthStatus::Healthy,
                message: "Service is running".to_string(),
                duration_ms: 0,
            }],
        )
    }

    /// Ready when the fitness backend answers a users listing
    pub async fn readiness(&self) -> HealthResponse {
        let started = Instant::now();
        let backend = self.check_backend().await;
        self.respond(started, vec![backend])
    }

    async fn check_backend(&self) -> ComponentHealth {
        let started = Instant::now();
        let (status, message) = match self.api.list(Resource::Users).await {
            Ok(_) => (HealthStatus::Healthy, "Fitness API reachable".to_string()),
            Err(e) => {
                warn!("Readiness probe failed: {}", e);
                (HealthStatus::Unhealthy, format!("Fitness API check failed: {}", e))
            }
        };
        ComponentHealth {
            name: "fitness_api".to_string(),
            status,
            message,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// `/health` and `/ready` warp filters
pub mod middleware {
    use super::*;
    use warp::http::StatusCode;
    use warp::{Filter, Reply};

    pub fn routes(
        health_checker: Arc<HealthChecker>,
    ) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
        let health = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_health_checker(health_checker.clone()))
            .and_then(health_handler);

        let ready = warp::path("ready")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_health_checker(health_checker))
            .and_then(readiness_handler);

        health.or(ready)
    }

    fn with_health_checker(
        health_checker: Arc<HealthChecker>,
    ) -> impl Filter<Extract = (Arc<HealthChecker>,), Error = std::convert::Infallible> + Clone {
        warp::any().map(move || health_checker.clone())
    }

    fn status_code(status: HealthStatus) -> StatusCode {
        match status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    async fn health_handler(
        health_checker: Arc<HealthChecker>,
    ) -> Result<impl Reply, warp::Rejection> {
        let response = health_checker.basic_health().await;
        Ok(warp::reply::with_status(
            warp::reply::json(&response),
            status_code(response.status),
        ))
    }

    async fn readiness_handler(
        health_checker: Arc<HealthChecker>,
    ) -> Result<impl Reply, warp::Rejection> {
        let response = health_checker.readiness().await;
        Ok(warp::reply::with_status(
            warp::reply::json(&response),
            status_code(response.status),
        ))
    }
}
