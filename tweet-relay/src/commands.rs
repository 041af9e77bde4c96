//! Admin commands: parsing and reply texts.

use relay_core::{is_valid_account, normalize_account, RelayBotError, UsageError};
use relay_storage::RelayConfig;

pub const SETCHANNEL_USAGE: &str = "Usage: /setchannel @channelname";
pub const ADDTWITTER_USAGE: &str = "Usage: /addtwitter username";
pub const REMOVETWITTER_USAGE: &str = "Usage: /removetwitter username";

pub const START_REPLY: &str = "✅ Bot is online!\nUse /help to see available commands.";
pub const ALREADY_TRACKED_REPLY: &str = "⚠️ Twitter account already tracked.";
pub const NOT_FOUND_REPLY: &str = "⚠️ Twitter account not found.";
pub const NO_ACCOUNTS_REPLY: &str = "⚠️ No Twitter accounts are being tracked.";
pub const CHANNEL_NOT_SET_REPLY: &str =
    "⚠️ Channel not set. Use /setchannel to set your Telegram channel.";

pub const HELP_TEXT: &str = "/setchannel @channelname - Set your Telegram channel\n\
/addtwitter username - Track a Twitter account\n\
/removetwitter username - Remove tracked Twitter account\n\
/listtwitters - List all tracked accounts\n\
/fetch - Manually fetch latest tweets\n\
/status - Show bot status";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    SetChannel(String),
    AddTwitter(String),
    RemoveTwitter(String),
    ListTwitters,
    Status,
    Fetch,
}

impl Command {
    /// Parses a chat message.
    ///
    /// Returns None for plain text and unknown commands. A `@botname` suffix on the command is
    /// ignored, as are extra arguments to commands that take none. Commands that take one
    /// argument require exactly one.
    pub fn parse(text: &str) -> Option<Result<Command, UsageError>> {
        let mut words = text.split_whitespace();
        let head = words.next()?.strip_prefix('/')?;
        let name = head.split('@').next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "start" => Ok(Command::Start),
            "help" => Ok(Command::Help),
            "listtwitters" => Ok(Command::ListTwitters),
            "status" => Ok(Command::Status),
            "fetch" => Ok(Command::Fetch),
            "setchannel" => single_arg(&args, SETCHANNEL_USAGE).map(Command::SetChannel),
            "addtwitter" => account_arg(&args, ADDTWITTER_USAGE)
                .and_then(|account| valid_handle(account, ADDTWITTER_USAGE))
                .map(Command::AddTwitter),
            "removetwitter" => {
                account_arg(&args, REMOVETWITTER_USAGE).map(Command::RemoveTwitter)
            }
            _ => return None,
        };
        Some(command)
    }

    /// Name without the leading slash, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::SetChannel(_) => "setchannel",
            Command::AddTwitter(_) => "addtwitter",
            Command::RemoveTwitter(_) => "removetwitter",
            Command::ListTwitters => "listtwitters",
            Command::Status => "status",
            Command::Fetch => "fetch",
        }
    }

    /// Whether executing the command writes the config.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::SetChannel(_) | Command::AddTwitter(_) | Command::RemoveTwitter(_)
        )
    }
}

fn single_arg(args: &[&str], usage: &'static str) -> Result<String, UsageError> {
    match args {
        [value] => Ok((*value).to_string()),
        _ => Err(UsageError::new(usage)),
    }
}

fn account_arg(args: &[&str], usage: &'static str) -> Result<String, UsageError> {
    let account = normalize_account(&single_arg(args, usage)?);
    if account.is_empty() {
        return Err(UsageError::new(usage));
    }
    Ok(account)
}

/// Only well-formed handles can be added. Removal accepts any stored entry.
fn valid_handle(account: String, usage: &'static str) -> Result<String, UsageError> {
    if is_valid_account(&account) {
        Ok(account)
    } else {
        Err(UsageError::new(usage))
    }
}

pub fn channel_set_reply(channel: &str) -> String {
    format!("✅ Channel set to {}", channel)
}

pub fn added_reply(account: &str) -> String {
    format!("✅ Added Twitter account: {}", account)
}

pub fn removed_reply(account: &str) -> String {
    format!("✅ Removed Twitter account: {}", account)
}

pub fn fetch_complete_reply(relayed: usize) -> String {
    format!("✅ Fetch complete. {} new tweet(s) sent.", relayed)
}

pub fn command_failed_reply(error: &RelayBotError) -> String {
    match error {
        RelayBotError::Persistence(_) => {
            "❌ Failed to save configuration. Nothing was changed.".to_string()
        }
        RelayBotError::Relay(e) => format!("❌ Fetch failed: {}", e),
    }
}

/// `/listtwitters` reply.
pub fn format_account_list(config: &RelayConfig) -> String {
    if config.twitters.is_empty() {
        return NO_ACCOUNTS_REPLY.to_string();
    }
    let mut out = String::from("📌 Tracked Twitter accounts:");
    for account in &config.twitters {
        out.push_str("\n• ");
        out.push_str(account);
    }
    out
}

/// `/status` reply; also printed by the `status` CLI subcommand.
pub fn format_status(config: &RelayConfig) -> String {
    let mut out = format!(
        "🟢 Bot Status\nChannel: {}\nTracked accounts: {}\n",
        config.channel().unwrap_or("Not set"),
        config.twitters.len()
    );
    for account in &config.twitters {
        out.push_str(&format!(
            "\n@{} - Last tweet ID: {}",
            account,
            config.last_seen(account).unwrap_or("No tweets fetched yet")
        ));
    }
    out
}
