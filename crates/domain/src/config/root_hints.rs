use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::errors::ConfigError;

/// Where the lookup starts. Explicit `servers` win over `file`; with
/// neither, the built-in root server list is used.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RootHintsConfig {
    #[serde(default)]
    pub servers: Vec<String>,

    /// One address per line, `#` starts a comment.
    #[serde(default)]
    pub file: Option<String>,
}

impl RootHintsConfig {
    pub fn addresses(&self) -> Result<Vec<IpAddr>, ConfigError> {
        self.servers
            .iter()
            .map(|s| {
                s.trim().parse::<IpAddr>().map_err(|_| {
                    ConfigError::Validation(format!("Invalid root hint address '{}'", s))
                })
            })
            .collect()
    }
}
