//! Ser Recicla Server Binary

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use recicla_config::{ConfigLoader, ReciclaConfig};
use recicla_server::Server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server bind address, e.g. 0.0.0.0:8080
    #[arg(short, long)]
    bind: Option<String>,

    /// Database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", ReciclaConfig::generate_sample());
        return Ok(());
    }

    let mut config = ConfigLoader::new()
        .load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    apply_cli_overrides(&mut config, &cli)?;
    config.validate_all().context("Invalid configuration")?;

    let server = Server::new(config).await?;
    server.start().await
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut ReciclaConfig, cli: &Cli) -> Result<()> {
    if let Some(bind) = &cli.bind {
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", bind, e))?;
        config.server.bind_address = addr.ip().to_string();
        config.server.port = addr.port();
    }

    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }

    Ok(())
}
