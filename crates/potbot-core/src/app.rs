//! Command handlers, independent of the chat platform.

use std::{sync::Arc, time::Duration};

use tracing::{info, warn};

use crate::{
    chaos::ChaosReading,
    commands::{Command, CommandError},
    domain::ChatId,
    formatting::{escape_html, format_amount},
    messaging::port::MessagingPort,
    poll::PollSpec,
    ports::PriceSource,
    pot::Pot,
    stake::{StakeAmount, RAKE_RATE},
    Result,
};

pub const START_MESSAGE: &str = "🎰 <b>Pot Bot</b>\n\n\
<b>📋 Commands:</b>\n\
/start - Show this help message\n\
/poll - Price poll: where is the market heading?\n\
/stake &lt;amount&gt; - Add to the pot (simulated, no funds move)\n\
/chaos - Roll today's chaos score";

pub const STAKE_USAGE: &str =
    "Usage: <code>/stake &lt;amount&gt;</code> with a positive number, e.g. <code>/stake 0.5</code>";

pub const POLL_FAILED: &str = "⚠️ Couldn't fetch the price right now. Try again in a bit.";

/// Handler set plus the state they share.
pub struct PotBot {
    pot: Arc<Pot>,
    prices: Arc<dyn PriceSource>,
    messenger: Arc<dyn MessagingPort>,
    poll_open_period: Duration,
    /// Our username; `/cmd@someone_else` is left for that bot.
    bot_username: Option<String>,
}

impl PotBot {
    pub fn new(
        pot: Arc<Pot>,
        prices: Arc<dyn PriceSource>,
        messenger: Arc<dyn MessagingPort>,
        poll_open_period: Duration,
        bot_username: Option<String>,
    ) -> Self {
        Self {
            pot,
            prices,
            messenger,
            poll_open_period,
            bot_username,
        }
    }

    /// Route one incoming text message. Non-command text is ignored.
    ///
    /// The returned error only ever reflects a failed reply; price and
    /// validation failures are answered in-chat and end here.
    pub async fn handle_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let Some(parsed) = Command::parse(text, self.bot_username.as_deref()) else {
            return Ok(());
        };

        match parsed {
            Ok(cmd) => self.dispatch(chat_id, cmd).await,
            Err(CommandError::InvalidStake(e)) => {
                info!(chat_id = chat_id.0, error = %e, "stake rejected");
                self.reply(chat_id, STAKE_USAGE).await
            }
            Err(CommandError::Unknown(name)) => {
                let msg = format!(
                    "Unknown command: /{}. Try /start.",
                    escape_html(&name)
                );
                self.reply(chat_id, &msg).await
            }
        }
    }

    pub async fn dispatch(&self, chat_id: ChatId, cmd: Command) -> Result<()> {
        match cmd {
            Command::Start => self.start(chat_id).await,
            Command::Poll => self.poll(chat_id).await,
            Command::Stake(amount) => self.stake(chat_id, amount).await,
            Command::Chaos => self.chaos(chat_id).await,
        }
    }

    pub async fn start(&self, chat_id: ChatId) -> Result<()> {
        self.reply(chat_id, START_MESSAGE).await
    }

    pub async fn poll(&self, chat_id: ChatId) -> Result<()> {
        let quote = match self.prices.quote().await {
            Ok(q) => q,
            Err(e) => {
                warn!(chat_id = chat_id.0, error = %e, "price fetch failed");
                return self.reply(chat_id, POLL_FAILED).await;
            }
        };

        let poll = PollSpec::market(&quote, self.poll_open_period);
        if let Err(e) = self.messenger.send_poll(chat_id, &poll).await {
            warn!(chat_id = chat_id.0, error = %e, "poll creation failed");
            return self.reply(chat_id, POLL_FAILED).await;
        }

        info!(
            chat_id = chat_id.0,
            asset = %quote.asset,
            price = quote.price,
            "poll created"
        );
        Ok(())
    }

    pub async fn stake(&self, chat_id: ChatId, amount: StakeAmount) -> Result<()> {
        let receipt = self.pot.add(amount).await;
        info!(
            chat_id = chat_id.0,
            amount = receipt.amount.value(),
            total = receipt.total,
            "stake accepted"
        );

        let msg = format!(
            "💰 Staked <b>{}</b>\n\
Rake ({}%): {}\n\
Pot is now <b>{}</b>",
            format_amount(receipt.amount.value()),
            (RAKE_RATE * 100.0).round(),
            format_amount(receipt.rake),
            format_amount(receipt.total),
        );
        self.reply(chat_id, &msg).await
    }

    pub async fn chaos(&self, chat_id: ChatId) -> Result<()> {
        let reading = ChaosReading::roll();
        let msg = format!(
            "{} Chaos score: <b>{}</b>/100 ({})",
            reading.sentiment.emoji(),
            reading.score,
            reading.sentiment,
        );
        self.reply(chat_id, &msg).await
    }

    async fn reply(&self, chat_id: ChatId, html: &str) -> Result<()> {
        self.messenger.send_html(chat_id, html).await?;
        Ok(())
    }
}
