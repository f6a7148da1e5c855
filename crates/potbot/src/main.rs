use std::sync::Arc;

use potbot_core::{config::Config, ports::PriceSource, pot::Pot};
use potbot_price::HttpPriceSource;

#[tokio::main]
async fn main() -> Result<(), potbot_core::Error> {
    potbot_core::logging::init("potbot")?;

    let cfg = Arc::new(Config::load()?);

    // The pot lives exactly as long as this process.
    let pot = Arc::new(Pot::new());
    let prices: Arc<dyn PriceSource> = Arc::new(HttpPriceSource::from_config(&cfg)?);

    tracing::info!("starting potbot");
    potbot_telegram::router::run_polling(cfg, pot, prices)
        .await
        .map_err(|e| potbot_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
