//! Static file server for the local web page, with permissive CORS so the
//! page can reach the log collector from another origin.

use clap::Parser;
use moblog_server::cli::StaticCli;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = StaticCli::parse();
    moblog_server::init_tracing(&cli.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "moblog-static starting");

    let config = cli.resolve()?;
    if let Err(e) = moblog_api::server::serve_static(config).await {
        error!(error = %e, "Static server failed");
        return Err(e);
    }
    Ok(())
}
