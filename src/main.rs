// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use warp::Filter;

use octofit_dashboard::client::{FitnessApi, HttpApiClient};
use octofit_dashboard::config::ServerConfig;
use octofit_dashboard::health::{middleware, HealthChecker};
use octofit_dashboard::{logging, routes};

#[derive(Parser, Debug)]
#[command(author, version, about = "OctoFit fitness dashboard", long_about = None)]
struct Args {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to serve on (overrides HTTP_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Fixed fitness API base URL (overrides FITNESS_API_URL and the workspace rule)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env may carry RUST_LOG and LOG_FORMAT
    dotenv::dotenv().ok();
    logging::init_from_env().context("Failed to initialize logging")?;

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(api_url) = args.api_url {
        config.api_url = Some(api_url);
    }
    config.validate()?;
    info!("{}", config.summary());

    let api: Arc<dyn FitnessApi> = Arc::new(HttpApiClient::new(config.base_url_source()));
    let health_checker = Arc::new(HealthChecker::new(api.clone(), config.environment.clone()));

    let app = middleware::routes(health_checker)
        .or(routes::routes(api))
        .with(warp::trace::request());

    let addr = config.bind_addr()?;
    info!("OctoFit dashboard listening on http://{}", addr);
    warp::serve(app).run(addr).await;

    Ok(())
}
