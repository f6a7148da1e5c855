use std::time::Duration;

use crate::{formatting::format_price, ports::Quote};

pub const POLL_OPTIONS: [&str; 3] = ["🚀 Pump", "📉 Dump", "🦀 Crab"];

/// Platform-agnostic description of a native poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollSpec {
    pub question: String,
    pub options: Vec<String>,
    pub is_anonymous: bool,
    pub open_period: Duration,
}

impl PollSpec {
    /// The market poll: current price in the question, three fixed options,
    /// anonymous voting, auto-close after `open_period`.
    pub fn market(quote: &Quote, open_period: Duration) -> Self {
        Self {
            question: market_question(quote, open_period),
            options: POLL_OPTIONS.iter().map(|s| s.to_string()).collect(),
            is_anonymous: true,
            open_period,
        }
    }
}

fn market_question(quote: &Quote, open_period: Duration) -> String {
    format!(
        "{} is at {} {}. Where is it heading in the next {}?",
        quote.asset.to_uppercase(),
        format_price(quote.price),
        quote.currency.to_uppercase(),
        humanize_period(open_period),
    )
}

fn humanize_period(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        let mins = secs / 60;
        if mins == 1 {
            return "minute".to_string();
        }
        return format!("{mins} minutes");
    }
    format!("{secs} seconds")
}
