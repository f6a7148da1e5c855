use async_trait::async_trait;

use crate::Result;

/// A single price quote: one asset, one currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub asset: String,
    pub currency: String,
    pub price: f64,
}

/// Hexagonal port for the price API.
///
/// One read per call. Implementations must not retry or cache; any failure
/// (transport, status, body shape) comes back as `Error::External`.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn quote(&self) -> Result<Quote>;
}
