mod config;
mod handlers;
mod http;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "console-server", version, about = "Console demo HTTP service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let app_config = AppConfig::load()?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
    }
}

async fn run_server(cmd: ServeCommand, config: AppConfig) -> Result<()> {
    let state = AppState::new(config);
    if state.api_keys.is_enabled() {
        info!("api key check enabled for /save");
    }
    http::serve(cmd.into(), state).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults_to_port_8080() {
        let cli = Cli::try_parse_from(["console-server", "serve"]).unwrap();
        let Command::Serve(cmd) = cli.command;
        assert_eq!(cmd.port, 8080);
        assert!(cmd.host.is_unspecified());
    }

    #[test]
    fn serve_accepts_port_flag() {
        let cli = Cli::try_parse_from(["console-server", "serve", "--port", "9090"]).unwrap();
        let Command::Serve(cmd) = cli.command;
        assert_eq!(cmd.port, 9090);
    }
}
