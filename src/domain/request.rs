use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageId, MessageText, Recipient, SenderId};

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Custom sender id; when absent the account's default sender applies.
    pub sender: Option<SenderId>,
    /// Send as flash SMS (displayed immediately, not stored on the handset).
    pub flash: bool,
    /// Explicit message id; a random one is drawn when absent.
    pub message_id: Option<MessageId>,
}

#[derive(Debug, Clone)]
pub struct SendSms {
    recipients: Vec<Recipient>,
    text: MessageText,
    options: SendOptions,
}

impl SendSms {
    pub fn new(
        recipients: Vec<Recipient>,
        text: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: Recipient::FIELD,
            });
        }
        Ok(Self {
            recipients,
            text,
            options,
        })
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }

    /// Balance units this request consumes: one per 160-character part per
    /// recipient.
    pub fn units(&self) -> u32 {
        self.recipients.len() as u32 * self.text.parts()
    }
}
