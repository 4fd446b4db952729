//! Root server addresses the resolver starts from.

use rootwalk_domain::config::{ConfigError, RootHintsConfig};
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// IPv4 addresses of a.root-servers.net through m.root-servers.net.
pub const BUILTIN_ROOT_SERVERS: [Ipv4Addr; 13] = [
    Ipv4Addr::new(198, 41, 0, 4),
    Ipv4Addr::new(170, 247, 170, 2),
    Ipv4Addr::new(192, 33, 4, 12),
    Ipv4Addr::new(199, 7, 91, 13),
    Ipv4Addr::new(192, 203, 230, 10),
    Ipv4Addr::new(192, 5, 5, 241),
    Ipv4Addr::new(192, 112, 36, 4),
    Ipv4Addr::new(198, 97, 190, 53),
    Ipv4Addr::new(192, 36, 148, 17),
    Ipv4Addr::new(192, 58, 128, 30),
    Ipv4Addr::new(193, 0, 14, 129),
    Ipv4Addr::new(199, 7, 83, 42),
    Ipv4Addr::new(202, 12, 27, 33),
];

/// Resolves the configured hint source: explicit servers, then a file,
/// then the built-in list.
pub fn load_root_hints(config: &RootHintsConfig) -> Result<Vec<IpAddr>, ConfigError> {
    if !config.servers.is_empty() {
        return config.addresses();
    }

    if let Some(path) = &config.file {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.clone(), e.to_string()))?;
        let hints = parse_root_hints(&contents)?;
        if hints.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Root hints file {} lists no servers",
                path
            )));
        }
        debug!(path = %path, servers = hints.len(), "Loaded root hints file");
        return Ok(hints);
    }

    Ok(BUILTIN_ROOT_SERVERS.iter().copied().map(IpAddr::V4).collect())
}

/// One address per line; blank lines and `#` comments are skipped.
pub fn parse_root_hints(contents: &str) -> Result<Vec<IpAddr>, ConfigError> {
    let mut hints = Vec::new();
    for (index, raw) in contents.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let address = line.parse::<IpAddr>().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid root hint address '{}' on line {}",
                line,
                index + 1
            ))
        })?;
        if !hints.contains(&address) {
            hints.push(address);
        }
    }
    Ok(hints)
}
