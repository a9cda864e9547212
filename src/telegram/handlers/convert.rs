//! The convert flow: validate → encode → send photo → record
//!
//! Failure policy: invalid input and encode/send failures each produce a
//! fixed user-visible reply and a log line, never a raw error. The history
//! write happens after the photo is sent and cannot affect the reply.

use teloxide::prelude::*;
use teloxide::types::InputFile;

use super::types::{HandlerDeps, HandlerError};
use crate::core::qr::{ColorScheme, QrEncoder};
use crate::core::validation::is_valid_url;

pub const INVALID_URL_REPLY: &str = "Invalid URL. Please enter a valid URL.";
pub const ENCODE_FAILED_REPLY: &str = "An error occurred while generating the QR code.";
pub const SEND_FAILED_REPLY: &str = "An error occurred while sending the QR code photo.";

/// Converts one armed message: the payload the user sent after /qr_code.
///
/// State always returns to idle afterward (the caller has already
/// consumed the pending entry); no retries are attempted.
pub async fn handle_input(bot: &Bot, msg: &Message, deps: &HandlerDeps, scheme: ColorScheme) -> Result<(), HandlerError> {
    let input = msg.text().unwrap_or_default();

    if !is_valid_url(input) {
        bot.send_message(msg.chat.id, INVALID_URL_REPLY).await?;
        return Ok(());
    }

    let png = match QrEncoder::with_scheme(scheme).encode(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Error generating QR code for chat {}: {}", msg.chat.id, e);
            bot.send_message(msg.chat.id, ENCODE_FAILED_REPLY).await?;
            return Ok(());
        }
    };

    let photo = InputFile::memory(png).file_name("qr.png");
    match bot.send_photo(msg.chat.id, photo).await {
        Ok(_) => {
            let user_id = msg
                .from
                .as_ref()
                .and_then(|u| i64::try_from(u.id.0).ok())
                .unwrap_or(msg.chat.id.0);
            let user_name = msg.from.as_ref().and_then(|u| u.username.clone());
            // Fire-and-forget: the photo is already delivered.
            let _ = deps.history.record(user_id, user_name, input.to_string());
        }
        Err(e) => {
            log::error!("Error sending QR code photo to chat {}: {}", msg.chat.id, e);
            bot.send_message(msg.chat.id, SEND_FAILED_REPLY).await?;
        }
    }

    Ok(())
}
