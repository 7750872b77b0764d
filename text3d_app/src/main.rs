//! text3d: rotating 3D text viewer
//!
//! `text3d serve` runs the HTTP parameter service; `text3d preview` renders a
//! submission headlessly for a number of frames.

mod client;
mod preview;
mod server;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use text3d_engine::config::{AppConfig, Config};
use text3d_engine::foundation::logging;
use text3d_engine::params::ParameterService;

use preview::PreviewArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML or RON); defaults apply when it is absent
    #[arg(long, global = true, default_value = "text3d.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP parameter service
    Serve {
        /// Interface to bind, overriding the config file
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to bind, overriding the config file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Render a submission headlessly
    Preview(PreviewArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;
    logging::init(&config.logging.level);

    match cli.command {
        Command::Serve { host, port } => {
            let host = match host {
                Some(host) => host,
                None => config.server.host.parse()?,
            };
            let address = SocketAddr::new(host, port.unwrap_or(config.server.port));
            server::serve(address, ParameterService::new()).await?;
        }
        Command::Preview(args) => {
            if let Err(err) = preview::run(&config, &args).await {
                log::error!("Preview failed: {}", err);
                return Err(err.into());
            }
        }
    }

    Ok(())
}
