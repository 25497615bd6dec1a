use clap::Parser;
use tracing::debug;

use tinylink::cli::Cli;
use tinylink::config::{get_config, init_config};
use tinylink::interfaces::cli::{CliContext, run_cli_command};
use tinylink::system::logging::init_logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_config();
    let config = get_config();
    let _guard = init_logging(&config.logging);
    debug!("Using link API at {}", config.api.base_url);

    let ctx = CliContext::from_config(config, cli.api_url);

    if let Err(e) = run_cli_command(cli.command, &ctx).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
