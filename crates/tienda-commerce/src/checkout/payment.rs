//! Payment processing.

use crate::checkout::{Order, DECLINED_MESSAGE};
use crate::error::CommerceError;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Charges an order.
///
/// A decline is reported as [`CommerceError::PaymentDeclined`]; any other
/// error aborts the checkout.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn charge(&self, order: &Order) -> Result<(), CommerceError>;
}

/// A stand-in processor: waits, then declines one charge in `failure_one_in`.
#[derive(Debug, Clone)]
pub struct SimulatedPayment {
    delay: Duration,
    failure_one_in: u32,
}

impl SimulatedPayment {
    /// Processing delay of the storefront simulation.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1200);

    /// A processor with a custom delay and decline rate. A rate of `0` never
    /// declines.
    pub fn new(delay: Duration, failure_one_in: u32) -> Self {
        Self {
            delay,
            failure_one_in,
        }
    }
}

impl Default for SimulatedPayment {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, 3)
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPayment {
    async fn charge(&self, order: &Order) -> Result<(), CommerceError> {
        tokio::time::sleep(self.delay).await;

        if self.failure_one_in == 0 {
            return Ok(());
        }
        let roll = rand::thread_rng().gen_range(1..=self.failure_one_in);
        if roll == self.failure_one_in {
            tracing::debug!(order = %order.id, "simulated payment declined");
            return Err(CommerceError::PaymentDeclined(DECLINED_MESSAGE.to_string()));
        }
        tracing::debug!(order = %order.id, "simulated payment approved");
        Ok(())
    }
}
