//! STV CLI - command line tool for querying the Sentinel-2 imagery service.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "stv-cli",
    version,
    about = "Sentinel-2 imagery service toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: stv_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    stv_cmd::run(cli.command).await
}
