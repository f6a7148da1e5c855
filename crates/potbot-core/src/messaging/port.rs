use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    poll::PollSpec,
    Result,
};

/// Outbound messenger port.
///
/// Telegram is the only implementation; handlers depend on this trait so they
/// can be driven by an in-memory fake in tests.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;

    /// Ask the platform to create a native poll. Voting, closing and tallying
    /// all happen on the platform side.
    async fn send_poll(&self, chat_id: ChatId, poll: &PollSpec) -> Result<MessageRef>;
}
