//! Delve terminal client.
//!
//! Composition root: reads configuration from the environment, sets up
//! logging, loads content into a [`delve_runtime::Session`] and hands
//! control to the line-based game loop.
//!
//! ```bash
//! DELVE_MAP=crates/client/maps/demo.txt DELVE_CONFIG=crates/client/maps/config.toml \
//!     cargo run -p delve-client
//! ```
mod app;
mod config;
mod input;
mod logging;
mod render;

use anyhow::Result;

use crate::app::App;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    App::bootstrap(config)?.run().await
}
