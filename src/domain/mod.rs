//! Domain layer: strong types with validation and invariants (no I/O).

mod auth;
mod request;
mod response;
mod validation;
mod value;

pub use auth::AuthHash;
pub use request::{SendOptions, SendSms};
pub use response::SendReceipt;
pub use validation::ValidationError;
pub use value::{
    Balance, Credentials, MessageId, MessageText, Password, Recipient, SenderId, ServerTime,
    UserName,
};
