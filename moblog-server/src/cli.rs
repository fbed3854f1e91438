use clap::Parser;
use moblog_core::config::{LogServerConfig, MoblogConfig, StaticServerConfig};
use moblog_core::error::MoblogError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moblog", version, about = "Mobile log collector — POST /log → mobile-logs.jsonl")]
pub struct LogCli {
    /// Port to listen on [default: 3001]
    pub port: Option<u16>,

    /// Optional YAML configuration file
    #[arg(short, long, default_value = "moblog.yaml")]
    pub config: PathBuf,

    /// Bind address [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// JSON Lines file events are appended to [default: mobile-logs.jsonl]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl LogCli {
    /// Resolve the final server config: file and env first, then flags.
    pub fn resolve(&self) -> Result<LogServerConfig, MoblogError> {
        let mut config = MoblogConfig::load(Some(self.config.as_path()))?.log_server;
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }
        Ok(config)
    }
}

#[derive(Parser, Debug)]
#[command(name = "moblog-static", version, about = "Static file server with permissive CORS")]
pub struct StaticCli {
    /// Port to listen on [default: 8000]
    pub port: Option<u16>,

    /// Optional YAML configuration file
    #[arg(short, long, default_value = "moblog.yaml")]
    pub config: PathBuf,

    /// Bind address [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Directory to serve [default: .]
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl StaticCli {
    pub fn resolve(&self) -> Result<StaticServerConfig, MoblogError> {
        let mut config = MoblogConfig::load(Some(self.config.as_path()))?.static_server;
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        Ok(config)
    }
}
