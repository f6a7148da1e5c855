use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::BotCommand};
use tracing::{info, warn};

use potbot_core::{
    app::PotBot, commands::COMMAND_MENU, config::Config, messaging::port::MessagingPort,
    ports::PriceSource, pot::Pot,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<PotBot>,
}

pub async fn run_polling(
    cfg: Arc<Config>,
    pot: Arc<Pot>,
    prices: Arc<dyn PriceSource>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info. The username also tells us which `/cmd@bot` commands are ours.
    let bot_username = match bot.get_me().await {
        Ok(me) => {
            info!("potbot started: @{}", me.username());
            Some(me.username().to_string())
        }
        Err(e) => {
            warn!(error = %e, "potbot started, but get_me failed");
            None
        }
    };
    info!(
        asset = %cfg.price_asset,
        currency = %cfg.price_currency,
        poll_open_period_secs = cfg.poll_open_period.as_secs(),
        "price source: {}",
        cfg.price_api_url
    );

    // Best-effort: the command menu is cosmetic.
    let menu = COMMAND_MENU
        .iter()
        .map(|(name, description)| BotCommand::new(*name, *description))
        .collect::<Vec<_>>();
    if let Err(e) = bot.set_my_commands(menu).await {
        warn!(error = %e, "failed to register command menu");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        bot: Arc::new(PotBot::new(
            pot,
            prices,
            messenger,
            cfg.poll_open_period,
            bot_username,
        )),
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    info!("potbot stopped");
    Ok(())
}
