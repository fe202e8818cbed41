use std::fmt::Write as _;

use crate::domain::{AuthHash, MessageId, MessageText, Recipient, SendSms, UserName};
use crate::transport::xml::{XML_HEADER, escape_text, extract_tag_text, login_block};

const STATUS_TEXT_TAG: &str = "StatusText";

pub fn encode_send_sms_request(
    user: &UserName,
    auth: &AuthHash,
    id: MessageId,
    request: &SendSms,
) -> String {
    let mut recipients = String::new();
    for (index, recipient) in request.recipients().iter().enumerate() {
        let _ = write!(
            recipients,
            "<Recipient><Id>{index}</Id><{tag}>{phone}</{tag}></Recipient>",
            tag = Recipient::FIELD,
            phone = escape_text(recipient.as_str()),
        );
    }

    let sender = request
        .options()
        .sender
        .as_ref()
        .map(|sender| escape_text(sender.as_str()))
        .unwrap_or_default();
    let flash = u8::from(request.options().flash);

    format!(
        "{XML_HEADER}<SMS><{id_tag}>{id}</{id_tag}>{login}\
         <Recipients>{recipients}</Recipients>\
         <Text><{line_tag}>{text}</{line_tag}></Text>\
         <Options><SenderNr>{sender}</SenderNr><BlitzSMS>{flash}</BlitzSMS></Options></SMS>",
        id_tag = MessageId::FIELD,
        login = login_block(user, auth),
        line_tag = MessageText::FIELD,
        text = escape_text(request.text().as_str()),
    )
}

/// Status text of the send response, `None` when the tag is absent.
pub fn decode_send_status(xml: &str) -> Option<String> {
    extract_tag_text(xml, STATUS_TEXT_TAG)
}
