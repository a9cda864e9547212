//! Command endpoints: /start, /qr_code, /help, /history

use chrono::NaiveDateTime;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::command::BotCommands;

use super::types::{HandlerDeps, HandlerError};
use crate::core::config;
use crate::core::qr::ColorScheme;
use crate::storage::db::get_history;
use crate::storage::get_connection;
use crate::telegram::bot::Command;

/// Prompt shown when the QR flow starts
pub const PROMPT_REPLY: &str = "Send your link or text";

const WELCOME_REPLY: &str = "Welcome to the QR code generator!\n\n\
Send /qr_code and I'll turn your next link into a QR code image.\n\
Send /help to see everything I can do.";

/// Handles /start: welcome message plus the menu keyboard.
pub async fn handle_start_command(bot: &Bot, chat_id: ChatId) -> Result<(), HandlerError> {
    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("🔳 Create a QR code", "menu:qr"),
        InlineKeyboardButton::callback("ℹ️ Help", "menu:help"),
    ]]);

    bot.send_message(chat_id, WELCOME_REPLY).reply_markup(keyboard).await?;
    Ok(())
}

/// Handles /qr_code: prompts for input, offers the color choice, and arms
/// the one-shot pending entry for this chat.
///
/// The default palette is black on white; the inline buttons let the user
/// switch before sending their link.
pub async fn handle_qr_code_command(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Black & White", "qr:bw"),
        InlineKeyboardButton::callback("Blue", "qr:blue"),
    ]]);

    deps.arm(chat_id, ColorScheme::BlackWhite);
    bot.send_message(chat_id, PROMPT_REPLY).reply_markup(keyboard).await?;
    Ok(())
}

/// Handles /help: prints the command list.
pub async fn handle_help_command(bot: &Bot, chat_id: ChatId) -> Result<(), HandlerError> {
    bot.send_message(chat_id, Command::descriptions().to_string()).await?;
    Ok(())
}

/// Handles /history: shows the user's recent accepted requests.
pub async fn handle_history_command(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let conn = match get_connection(&deps.db_pool) {
        Ok(conn) => conn,
        Err(e) => {
            log::error!("Failed to get DB connection for /history: {}", e);
            bot.send_message(chat_id, "Could not load your history. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    let entries = match get_history(&conn, user_id, Some(config::history::DISPLAY_LIMIT)) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Failed to read history for user {}: {}", user_id, e);
            bot.send_message(chat_id, "Could not load your history. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    if entries.is_empty() {
        bot.send_message(chat_id, "You have no QR codes yet. Send /qr_code to create one!")
            .await?;
        return Ok(());
    }

    let mut text = String::from("Your recent QR codes:\n\n");
    for (idx, entry) in entries.iter().enumerate() {
        text.push_str(&format!(
            "{}. {} — {}\n",
            idx + 1,
            entry.input,
            format_timestamp(&entry.timestamp)
        ));
    }

    bot.send_message(chat_id, text).await?;
    Ok(())
}

/// Formats a SQLite timestamp (YYYY-MM-DD HH:MM:SS) for display.
fn format_timestamp(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(dt) => dt.format("%b %-d, %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
