mod logging;

use rootwalk_domain::{CliOverrides, Config};
use rootwalk_infrastructure::system::load_root_hints;
use std::net::IpAddr;
use tracing::{debug, error};

pub use logging::init_logging;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn root_hints(config: &Config) -> anyhow::Result<Vec<IpAddr>> {
    let hints = load_root_hints(&config.root_hints).map_err(|e| {
        error!("Failed to load root hints: {}", e);
        anyhow::anyhow!(e)
    })?;
    debug!(servers = hints.len(), "Root hints loaded");
    Ok(hints)
}
