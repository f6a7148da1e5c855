use tokio::sync::Mutex;

use crate::stake::{StakeAmount, StakeReceipt};

/// The simulated pot: a running total of every accepted stake.
///
/// Created once by the entry point and shared through the app state. Starts at
/// zero, only ever grows, and is dropped with the process.
#[derive(Debug, Default)]
pub struct Pot {
    total: Mutex<f64>,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn total(&self) -> f64 {
        *self.total.lock().await
    }

    /// Add the full stake to the pot. The rake is computed for display only.
    pub async fn add(&self, amount: StakeAmount) -> StakeReceipt {
        let mut total = self.total.lock().await;
        *total += amount.value();
        StakeReceipt {
            amount,
            rake: amount.rake(),
            total: *total,
        }
    }
}
