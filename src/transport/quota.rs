use crate::domain::{AuthHash, Balance, UserName};
use crate::transport::xml::{XML_HEADER, extract_tag_text, login_block};

pub fn encode_quota_request(user: &UserName, auth: &AuthHash) -> String {
    format!(
        "{XML_HEADER}<SMS_QUOTA>{}</SMS_QUOTA>",
        login_block(user, auth)
    )
}

/// Raw quota text; the connector omits the tag on some failures, which maps
/// to a zero balance rather than an error.
pub fn decode_quota_response(xml: &str) -> Option<String> {
    extract_tag_text(xml, Balance::FIELD)
}
