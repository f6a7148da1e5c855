//! Price API adapter.
//!
//! Reads a CoinGecko-style `simple/price` endpoint:
//! `GET {base}/simple/price?ids=<asset>&vs_currencies=<currency>` returning
//! `{ "<asset>": { "<currency>": <price> } }`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use potbot_core::{
    config::Config,
    errors::Error,
    ports::{PriceSource, Quote},
    Result,
};

#[derive(Clone, Debug)]
pub struct HttpPriceSource {
    base_url: String,
    asset: String,
    currency: String,
    http: reqwest::Client,
}

impl HttpPriceSource {
    pub fn new(
        base_url: impl Into<String>,
        asset: impl Into<String>,
        currency: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("price http client build failed: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            asset: asset.into(),
            currency: currency.into(),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            cfg.price_api_url.clone(),
            cfg.price_asset.clone(),
            cfg.price_currency.clone(),
            cfg.price_timeout,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/simple/price", self.base_url)
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn quote(&self) -> Result<Quote> {
        let resp = self
            .http
            .get(self.endpoint())
            .query(&[
                ("ids", self.asset.as_str()),
                ("vs_currencies", self.currency.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::External(format!("price request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::External(format!(
                "price api failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let v: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::External(format!("price json error: {e}")))?;
        debug!(body = %v, "price response");

        let price = extract_price(&v, &self.asset, &self.currency)?;
        Ok(Quote {
            asset: self.asset.clone(),
            currency: self.currency.clone(),
            price,
        })
    }
}

/// Pull `body[asset][currency]` out of a `simple/price` response.
pub fn extract_price(body: &serde_json::Value, asset: &str, currency: &str) -> Result<f64> {
    let price = body
        .get(asset)
        .ok_or_else(|| Error::External(format!("price response missing asset {asset}")))?
        .get(currency)
        .ok_or_else(|| {
            Error::External(format!(
                "price response missing currency {currency} for {asset}"
            ))
        })?
        .as_f64()
        .ok_or_else(|| Error::External(format!("price for {asset}/{currency} is not a number")))?;

    if !price.is_finite() || price <= 0.0 {
        return Err(Error::External(format!(
            "price for {asset}/{currency} is out of range: {price}"
        )));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn source_for(server: &MockServer) -> HttpPriceSource {
        HttpPriceSource::new(server.uri(), "bitcoin", "usd", Duration::from_secs(5)).unwrap()
    }

    fn external_message(result: Result<Quote>) -> String {
        match result {
            Err(Error::External(msg)) => msg,
            other => panic!("expected external error, got {other:?}"),
        }
    }

    #[test]
    fn extracts_decimal_price() {
        let body = json!({ "bitcoin": { "usd": 67234.51 } });
        assert_eq!(extract_price(&body, "bitcoin", "usd").unwrap(), 67234.51);

        let body = json!({ "bitcoin": { "usd": 67000 } });
        assert_eq!(extract_price(&body, "bitcoin", "usd").unwrap(), 67000.0);
    }

    #[test]
    fn rejects_malformed_bodies() {
        let cases = [
            json!({}),
            json!({ "bitcoin": {} }),
            json!({ "ethereum": { "usd": 1.0 } }),
            json!({ "bitcoin": { "usd": "67000" } }),
            json!({ "bitcoin": { "usd": null } }),
            json!({ "bitcoin": { "usd": 0 } }),
            json!({ "error": "rate limited" }),
        ];
        for body in cases {
            assert!(
                matches!(extract_price(&body, "bitcoin", "usd"), Err(Error::External(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn builds_endpoint_without_double_slash() {
        let src = HttpPriceSource::new(
            "https://api.example.com/v3/",
            "bitcoin",
            "usd",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(src.endpoint(), "https://api.example.com/v3/simple/price");
    }

    #[tokio::test]
    async fn quotes_price_with_asset_and_currency_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "bitcoin": { "usd": 67234.51 } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let quote = source_for(&server).quote().await.unwrap();
        assert_eq!(
            quote,
            Quote {
                asset: "bitcoin".to_string(),
                currency: "usd".to_string(),
                price: 67234.51,
            }
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_external_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Throttled"))
            .expect(1)
            .mount(&server)
            .await;

        let msg = external_message(source_for(&server).quote().await);
        assert!(msg.contains("429"), "{msg}");
        assert!(msg.contains("Throttled"), "{msg}");
    }

    #[tokio::test]
    async fn invalid_json_is_an_external_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let msg = external_message(source_for(&server).quote().await);
        assert!(msg.contains("price json error"), "{msg}");
    }

    #[tokio::test]
    async fn body_for_another_asset_is_an_external_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "ethereum": { "usd": 3100.0 } })),
            )
            .mount(&server)
            .await;

        let msg = external_message(source_for(&server).quote().await);
        assert!(msg.contains("missing asset bitcoin"), "{msg}");
    }

    #[tokio::test]
    async fn unreachable_api_is_an_external_error() {
        // Port 9 (discard) on loopback: connection refused or timeout, never a quote.
        let src = HttpPriceSource::new(
            "http://127.0.0.1:9",
            "bitcoin",
            "usd",
            Duration::from_millis(500),
        )
        .unwrap();
        assert!(matches!(src.quote().await, Err(Error::External(_))));
    }
}
