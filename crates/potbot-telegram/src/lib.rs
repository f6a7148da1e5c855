//! Telegram adapter (teloxide).
//!
//! This crate implements the `potbot-core` MessagingPort over the Telegram Bot API
//! and owns the update polling loop.

use async_trait::async_trait;

use teloxide::{prelude::*, types::ParseMode};

use tokio::time::sleep;
use tracing::warn;

pub mod handlers;
pub mod router;

use potbot_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::port::MessagingPort,
    poll::PollSpec,
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    /// Run a request, retrying once if Telegram answers with flood control.
    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(teloxide::RequestError::RetryAfter(d)) if attempts < MAX_RETRIES => {
                    attempts += 1;
                    warn!(retry_after = ?d, "telegram flood control, retrying");
                    sleep(d).await;
                }
                Err(other) => return Err(Self::map_err(other)),
            }
        }
    }
}

/// Telegram takes `open_period` in whole seconds (5..=600).
fn open_period_secs(poll: &PollSpec) -> u16 {
    u16::try_from(poll.open_period.as_secs()).unwrap_or(u16::MAX)
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef> {
        let msg = self
            .with_retry(|| {
                self.bot
                    .send_message(Self::tg_chat(chat_id), html.to_string())
                    .parse_mode(ParseMode::Html)
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_poll(&self, chat_id: ChatId, poll: &PollSpec) -> Result<MessageRef> {
        let open_period = open_period_secs(poll);
        let msg = self
            .with_retry(|| {
                self.bot
                    .send_poll(
                        Self::tg_chat(chat_id),
                        poll.question.clone(),
                        poll.options.clone(),
                    )
                    .is_anonymous(poll.is_anonymous)
                    .open_period(open_period)
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }
}
