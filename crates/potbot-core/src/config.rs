use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_PRICE_ASSET: &str = "bitcoin";
pub const DEFAULT_PRICE_CURRENCY: &str = "usd";

/// Telegram accepts `open_period` between 5 and 600 seconds.
pub const MIN_POLL_OPEN_PERIOD_SECS: u64 = 5;
pub const MAX_POLL_OPEN_PERIOD_SECS: u64 = 600;

/// Typed configuration, loaded from the environment (and `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    // Price API
    pub price_api_url: String,
    pub price_asset: String,
    pub price_currency: String,
    pub price_timeout: Duration,

    // Polls
    pub poll_open_period: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let price_api_url = lookup("PRICE_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_PRICE_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let price_asset = lookup("PRICE_ASSET")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_PRICE_ASSET.to_string())
            .to_lowercase();
        let price_currency = lookup("PRICE_CURRENCY")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_PRICE_CURRENCY.to_string())
            .to_lowercase();
        let price_timeout = Duration::from_millis(
            lookup("PRICE_TIMEOUT_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(10_000),
        );

        let poll_open_period = Duration::from_secs(
            lookup("POLL_OPEN_PERIOD")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(MAX_POLL_OPEN_PERIOD_SECS)
                .clamp(MIN_POLL_OPEN_PERIOD_SECS, MAX_POLL_OPEN_PERIOD_SECS),
        );

        Ok(Self {
            telegram_bot_token,
            price_api_url,
            price_asset,
            price_currency,
            price_timeout,
            poll_open_period,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn requires_bot_token() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn applies_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(cfg.price_api_url, DEFAULT_PRICE_API_URL);
        assert_eq!(cfg.price_asset, "bitcoin");
        assert_eq!(cfg.price_currency, "usd");
        assert_eq!(cfg.price_timeout, Duration::from_secs(10));
        assert_eq!(cfg.poll_open_period, Duration::from_secs(600));
    }

    #[test]
    fn normalizes_overrides() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("PRICE_API_URL", "http://localhost:8080/api/"),
            ("PRICE_ASSET", "Ethereum"),
            ("PRICE_CURRENCY", "EUR"),
            ("POLL_OPEN_PERIOD", "3600"),
        ]))
        .unwrap();
        assert_eq!(cfg.price_api_url, "http://localhost:8080/api");
        assert_eq!(cfg.price_asset, "ethereum");
        assert_eq!(cfg.price_currency, "eur");
        assert_eq!(cfg.poll_open_period, Duration::from_secs(600));

        let cfg = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("POLL_OPEN_PERIOD", "1"),
        ]))
        .unwrap();
        assert_eq!(cfg.poll_open_period, Duration::from_secs(5));
    }

    #[test]
    fn parses_dotenv_lines() {
        let parsed = parse_dotenv("# comment\n\nA=1\nB = \"two\"\nC='3'\nnot a pair\n=x\n");
        assert_eq!(
            parsed,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "two".to_string()),
                ("C".to_string(), "3".to_string()),
            ]
        );
    }
}
