//! Command-line interface: `run` starts the bot, `status` prints the persisted state.

use anyhow::Result;
use clap::{Parser, Subcommand};
use relay_storage::{ConfigRepository, JsonConfigStore};

use crate::commands::format_status;
use crate::config::{config_file_from_env, BotConfig};

#[derive(Parser)]
#[command(name = "tweet-relay")]
#[command(about = "Relays new Twitter posts to a Telegram channel", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (poll loop + admin commands)
    Run {
        /// Bot token (overrides BOT_TOKEN)
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print channel, tracked accounts and last-seen ids from the state file
    Status {
        /// State file (overrides CONFIG_FILE)
        #[arg(short, long)]
        config_file: Option<String>,
    },
}

/// Loads BotConfig from env; `token` overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Reads the state file (creating a default one if absent) and renders it like `/status`.
pub async fn status_report(config_file: Option<String>) -> Result<String> {
    let path = config_file.unwrap_or_else(config_file_from_env);
    let config = JsonConfigStore::new(path.as_str())
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
    Ok(format_status(&config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_storage::RelayConfig;
    use tempfile::TempDir;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["tweet-relay", "run", "--token", "abc"]).unwrap();
        match cli.command {
            Commands::Run { token } => assert_eq!(token.as_deref(), Some("abc")),
            Commands::Status { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["tweet-relay"]).is_err());
    }

    #[tokio::test]
    async fn test_status_report_reads_state_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = RelayConfig::default();
        config.set_channel("@news");
        config.add_account("bob");
        config.record_seen("bob", "7");
        JsonConfigStore::new(&path).save(&config).await.unwrap();

        let report = status_report(Some(path.display().to_string())).await.unwrap();

        assert!(report.contains("Channel: @news"));
        assert!(report.contains("@bob - Last tweet ID: 7"));
    }
}
