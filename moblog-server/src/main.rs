// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  moblog — mobile client log collector
//
//  POST /log     JSON object or array → mobile-logs.jsonl
//  GET  /health  liveness
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use clap::Parser;
use moblog_server::cli::LogCli;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = LogCli::parse();
    moblog_server::init_tracing(&cli.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "moblog starting");

    let config = cli.resolve()?;
    if let Err(e) = moblog_api::server::serve_logs(config).await {
        error!(error = %e, "Log server failed");
        return Err(e);
    }
    Ok(())
}
