//! Telegram update handlers: unwrap the teloxide message, hand the text to the core.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};
use tracing::{debug, error};

use potbot_core::domain::ChatId;

use crate::router::AppState;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = ChatId(msg.chat.id.0);

    debug!(
        chat_id = chat_id.0,
        user_id = msg.from().map(|u| u.id.0),
        text,
        "incoming message"
    );

    // Handler failures stay inside this update; the dispatcher keeps running.
    if let Err(e) = state.bot.handle_text(chat_id, text).await {
        error!(chat_id = chat_id.0, error = %e, "reply failed");
    }

    Ok(())
}
