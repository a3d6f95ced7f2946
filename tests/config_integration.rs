// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration loading against a working directory with a `.env` file
//!
//! Kept to a single test: it changes the process working directory.

use anyhow::Result;
use octofit_dashboard::config::ServerConfig;
use tempfile::TempDir;

#[test]
fn test_from_env_does_not_read_dotenv_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join(".env"),
        "HTTP_PORT=4567\nENVIRONMENT=from-dotenv\n",
    )?;
    std::env::remove_var("HTTP_PORT");
    std::env::remove_var("ENVIRONMENT");
    std::env::set_current_dir(temp_dir.path())?;

    let config = ServerConfig::from_env()?;
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.environment, "development");
    assert!(std::env::var("HTTP_PORT").is_err());

    // Loading it explicitly, as the binary does, is what applies it
    dotenv::dotenv()?;
    let config = ServerConfig::from_env()?;
    assert_eq!(config.http_port, 4567);
    assert_eq!(config.environment, "from-dotenv");
    Ok(())
}
