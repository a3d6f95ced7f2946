// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # OctoFit Dashboard
//!
//! A server-rendered dashboard for the OctoFit fitness tracker. It reads users, teams,
//! activities, the leaderboard and workout suggestions from the fitness REST backend
//! and serves each collection as an HTML page. Users can be edited in place.
//!
//! ## Architecture
//!
//! - **Client**: [`client::FitnessApi`] and its reqwest implementation, resolving the
//!   backend base URL from the cloud workspace environment on every call
//! - **Models**: the five record types and collection-shape normalization
//! - **Views**: the shared loading / error / ready lifecycle, one page per resource and
//!   the user edit form
//! - **Routes**: the warp navigation shell plus health probes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use octofit_dashboard::client::HttpApiClient;
//! use octofit_dashboard::models::Team;
//! use octofit_dashboard::views::ListView;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = HttpApiClient::from_env();
//!     let mut teams = ListView::<Team>::mount();
//!     teams.load(&api).await;
//!     for team in teams.state().records() {
//!         println!("{} ({} points)", team.name, team.total_points);
//!     }
//! }
//! ```

/// Backend addressing and dashboard process configuration
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Record types served by the fitness backend
pub mod models;

/// HTTP client for the fitness backend
pub mod client;

/// List views, page templates and the user edit form
pub mod views;

/// Dashboard page routes
pub mod routes;

/// Production logging and structured output
pub mod logging;

/// Health checks and monitoring
pub mod health;
