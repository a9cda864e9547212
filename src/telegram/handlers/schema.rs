//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_help_command, handle_history_command, handle_qr_code_command, handle_start_command};
use super::convert::handle_input;
use super::types::{HandlerDeps, HandlerError};
use crate::core::qr::ColorScheme;
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Returns a handler tree for teloxide's Dispatcher. Commands are matched
/// first, then armed conversational messages, then callback queries;
/// everything else is ignored.
///
/// # Arguments
/// * `deps` - Handler dependencies (database pool, history store, pending state)
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_messages = deps.clone();
    let deps_callbacks = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callbacks))
}

/// Handler for bot commands (/start, /qr_code, /help, /history)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start => {
                        handle_start_command(&bot, msg.chat.id).await?;
                    }
                    Command::QrCode => {
                        handle_qr_code_command(&bot, msg.chat.id, &deps).await?;
                    }
                    Command::Help => {
                        handle_help_command(&bot, msg.chat.id).await?;
                    }
                    Command::History => {
                        let user_id = msg
                            .from
                            .as_ref()
                            .and_then(|u| i64::try_from(u.id.0).ok())
                            .unwrap_or(msg.chat.id.0);
                        handle_history_command(&bot, msg.chat.id, user_id, &deps).await?;
                    }
                }
                Ok(())
            }
        },
    ))
}

/// Handler for the one-shot conversational message after /qr_code.
///
/// Consumes the pending entry exactly once; a second message without
/// re-issuing /qr_code falls through unhandled.
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_filter = deps.clone();

    Update::filter_message()
        .filter(move |msg: Message| msg.text().is_some() && deps_filter.is_awaiting(msg.chat.id))
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                if let Some(scheme) = deps.take(msg.chat.id) {
                    handle_input(&bot, &msg, &deps, scheme).await?;
                }
                Ok(())
            }
        })
}

/// Handler for callback queries (menu buttons and color choice)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            let chat_id = match q.message.as_ref().map(|m| m.chat().id) {
                Some(chat_id) => chat_id,
                None => {
                    // Stale callback with no reachable message; just ack it.
                    bot.answer_callback_query(q.id).await?;
                    return Ok(());
                }
            };

            match q.data.as_deref() {
                Some("qr:bw") => {
                    deps.arm(chat_id, ColorScheme::BlackWhite);
                    bot.answer_callback_query(q.id)
                        .text("Generating a black & white QR code")
                        .await?;
                }
                Some("qr:blue") => {
                    deps.arm(chat_id, ColorScheme::BlueWhite);
                    bot.answer_callback_query(q.id).text("Generating a blue QR code").await?;
                }
                Some("menu:qr") => {
                    bot.answer_callback_query(q.id).await?;
                    handle_qr_code_command(&bot, chat_id, &deps).await?;
                }
                Some("menu:help") => {
                    bot.answer_callback_query(q.id).await?;
                    handle_help_command(&bot, chat_id).await?;
                }
                other => {
                    log::warn!("Unknown callback data from chat {}: {:?}", chat_id, other);
                    bot.answer_callback_query(q.id).await?;
                }
            }
            Ok(())
        }
    })
}
