//! Bot initialization and command definitions

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome message and menu")]
    Start,
    #[command(description = "turn a link or text into a QR code image")]
    QrCode,
    #[command(description = "show usage help")]
    Help,
    #[command(description = "show your recent requests")]
    History,
}

/// Creates a Bot instance from the configured token
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Token missing or HTTP client creation failed
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::BOT_TOKEN.clone();
    if token.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN environment variable not set"));
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    Ok(Bot::with_client(token, client))
}

/// Sets up bot commands in the Telegram UI
///
/// # Arguments
/// * `bot` - Bot instance to configure
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let commands = Command::descriptions();
        let command_list = format!("{}", commands);

        assert!(command_list.contains("These commands are supported"));
        assert!(command_list.contains("start"));
        assert!(command_list.contains("qr_code"));
        assert!(command_list.contains("help"));
        assert!(command_list.contains("history"));
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "qurl_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/qr_code", "qurl_bot").unwrap(), Command::QrCode);
        assert_eq!(Command::parse("/help", "qurl_bot").unwrap(), Command::Help);
        assert_eq!(Command::parse("/history", "qurl_bot").unwrap(), Command::History);
        assert!(Command::parse("not a command", "qurl_bot").is_err());
    }
}
