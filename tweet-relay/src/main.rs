//! Binary for the tweet relay bot.

use anyhow::Result;
use clap::Parser;
use tweet_relay::{load_config, run_bot, status_report, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Status { config_file } => {
            println!("{}", status_report(config_file).await?);
            Ok(())
        }
    }
}
