//! Typed Rust client for the freenet.de Email Office SMS XML connector.
//!
//! The design follows three layers: a domain layer of strong types, a
//! transport layer for the connector's XML wire format, and a small client
//! layer orchestrating requests. Every authenticated command is preceded by a
//! server-time fetch that salts the credential digest.
//!
//! ```rust,no_run
//! use emosms::{Credentials, EmoClient, MessageText, Recipient, SendOptions, SendSms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), emosms::EmoError> {
//!     let client = EmoClient::new(Credentials::new("user", "secret")?);
//!     let to = Recipient::new("+491701234567")?;
//!     let text = MessageText::new("hello")?;
//!     let request = SendSms::new(vec![to], text, SendOptions::default())?;
//!     let receipt = client.send_sms(&request).await?;
//!     println!("sent as {}", receipt.message_id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod connector;
pub mod domain;
mod transport;

pub use client::{EmoClient, EmoClientBuilder, EmoError};
pub use connector::Connector;
pub use domain::{
    AuthHash, Balance, Credentials, MessageId, MessageText, Password, Recipient, SendOptions,
    SendReceipt, SendSms, SenderId, ServerTime, UserName, ValidationError,
};
