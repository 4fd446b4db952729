use clap::Parser;
use rootwalk_application::use_cases::ResolveHostnameUseCase;
use rootwalk_domain::{CliOverrides, QueryType};
use rootwalk_infrastructure::dns::transport::UdpTransportFactory;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

mod bootstrap;

#[derive(Parser)]
#[command(name = "rootwalk")]
#[command(version)]
#[command(about = "Iterative DNS resolver that walks the delegation tree from the root servers")]
struct Cli {
    /// Hostname to resolve
    hostname: String,

    /// Look up the preferred mail exchange instead of an address
    #[arg(short = 'm', long, conflicts_with = "ipv6")]
    mx: bool,

    /// Look up an IPv6 address
    #[arg(short = '6', long)]
    ipv6: bool,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// File with one root server address per line
    #[arg(long, value_name = "FILE")]
    root_hints: Option<String>,

    /// Per-server response timeout in milliseconds
    #[arg(long, value_name = "N")]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn query_type(&self) -> QueryType {
        if self.mx {
            QueryType::MX
        } else if self.ipv6 {
            QueryType::AAAA
        } else {
            QueryType::A
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        query_timeout_ms: cli.timeout_ms,
        root_hints_file: cli.root_hints.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    let root_hints = bootstrap::root_hints(&config)?;
    let query_type = cli.query_type();

    let transports = Arc::new(UdpTransportFactory::new(config.resolver.max_datagram_size));
    let use_case = ResolveHostnameUseCase::new(transports, config.resolver.clone());

    let started = Instant::now();
    match use_case.execute(&cli.hostname, query_type, &root_hints).await {
        Ok(resolution) => {
            info!(
                name = %resolution.name,
                qtype = %query_type,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Resolved"
            );
            println!("{}", resolution);
            Ok(())
        }
        Err(e) => {
            error!(name = %cli.hostname, qtype = %query_type, error = %e, "Resolution failed");
            Err(e.into())
        }
    }
}
