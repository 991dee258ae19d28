//! Command implementations for the sentinel viewer CLI.
//!
//! Provides subcommands for querying the imagery service from the
//! terminal, sharing the request validator and wire types with the
//! browser front end.

use clap::Subcommand;

pub mod query;

#[derive(Subcommand)]
pub enum Command {
    /// Query the imagery service for tile layers
    Tiles {
        /// Start of the date range (YYYY-MM-DD)
        #[arg(short = 's', long)]
        start_date: String,

        /// End of the date range (YYYY-MM-DD)
        #[arg(short = 'e', long)]
        end_date: String,

        /// Bounding box as west,south,east,north degrees
        #[arg(short = 'b', long)]
        bbox: String,

        /// Base URL of the imagery service
        #[arg(long, default_value = stv_imagery::DEFAULT_BASE_URL)]
        base_url: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Tiles {
            start_date,
            end_date,
            bbox,
            base_url,
        } => query::run_tiles(&start_date, &end_date, &bbox, &base_url).await,
    }
}
