use quick_xml::Reader;
use quick_xml::events::Event;

use crate::domain::{AuthHash, UserName};

/// Header prepended to every command document.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Escape text content for embedding into a command document.
pub fn escape_text(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

/// `<Login>` block shared by the authenticated commands.
pub fn login_block(user: &UserName, auth: &AuthHash) -> String {
    format!(
        "<Login><{user_tag}>{user}</{user_tag}><{auth_tag}>{auth}</{auth_tag}></Login>",
        user_tag = UserName::FIELD,
        user = escape_text(user.as_str()),
        auth_tag = AuthHash::FIELD,
        auth = auth.as_str(),
    )
}

/// Text content of the first `tag` element found in `xml`.
///
/// A missing tag, an empty element, or any parse error all yield `None`:
/// malformed or truncated responses degrade to the field-absent path instead
/// of failing structurally.
pub fn extract_tag_text(xml: &str, tag: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if start.local_name().as_ref() == tag.as_bytes() => {
                let text = match reader.read_event() {
                    Ok(Event::Text(text)) => {
                        text.unescape().ok().map(|value| value.into_owned())
                    }
                    _ => None,
                };
                // Require the closing tag so values cut off by truncation
                // don't leak through.
                return match reader.read_event() {
                    Ok(Event::End(_)) => text.filter(|value| !value.is_empty()),
                    _ => None,
                };
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}
