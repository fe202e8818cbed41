//! Host-facing entry points: refresh the balance ("update") and transmit a
//! message ("send").
//!
//! The connector owns the long-lived balance counter the host displays. The
//! host serializes calls, so the methods take `&mut self` and no locking is
//! needed.

use crate::client::{EmoClient, EmoError};
use crate::domain::{Balance, SendReceipt, SendSms};

pub struct Connector {
    client: EmoClient,
    balance: Option<Balance>,
}

impl Connector {
    /// Wrap a client; the balance is unknown until the first [`update`].
    ///
    /// [`update`]: Connector::update
    pub fn new(client: EmoClient) -> Self {
        Self {
            client,
            balance: None,
        }
    }

    /// Last known balance, `None` before the first successful update.
    pub fn balance(&self) -> Option<Balance> {
        self.balance
    }

    /// Refresh the balance from the provider.
    ///
    /// The stored balance is left unchanged on failure.
    pub async fn update(&mut self) -> Result<Balance, EmoError> {
        let balance = self.client.fetch_quota().await?;
        self.balance = Some(balance);
        Ok(balance)
    }

    /// Send a message and debit the stored balance by the units consumed,
    /// clamped at zero.
    ///
    /// The stored balance is left unchanged on failure.
    pub async fn send(&mut self, request: &SendSms) -> Result<SendReceipt, EmoError> {
        let receipt = self.client.send_sms(request).await?;
        if let Some(balance) = self.balance {
            self.balance = Some(balance.debit(receipt.units));
        }
        Ok(receipt)
    }
}
