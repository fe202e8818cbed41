use crate::domain::ServerTime;
use crate::transport::xml::{XML_HEADER, extract_tag_text};

pub fn encode_server_time_request() -> String {
    format!("{XML_HEADER}<SMS_TIME>GetServerTime</SMS_TIME>")
}

pub fn decode_server_time_response(xml: &str) -> Option<ServerTime> {
    let value = extract_tag_text(xml, ServerTime::FIELD)?;
    ServerTime::new(value).ok()
}
