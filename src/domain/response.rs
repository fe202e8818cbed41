use crate::domain::value::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of a successful send.
pub struct SendReceipt {
    /// Message id the command was submitted under.
    pub message_id: MessageId,
    /// Balance units the send consumed.
    pub units: u32,
}
