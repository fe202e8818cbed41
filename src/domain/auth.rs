use std::fmt::Write as _;

use md5::{Digest, Md5};

use crate::domain::value::{Credentials, ServerTime};

/// Shared secret expected by the XML connector.
const SECRET: &str = "8GPRTK42ER1_";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Time-salted credential digest required by every authenticated command.
///
/// The value is `time ++ md5(md5(time ++ user) ++ SECRET ++ md5(password))`,
/// all digests as lowercase hex. It is valid only for the command that follows
/// the server-time fetch which produced `time`, and is never persisted.
pub struct AuthHash(String);

impl AuthHash {
    /// XML tag used by the connector (`AuthHash`).
    pub const FIELD: &'static str = "AuthHash";

    /// Derive the hash for one command.
    pub fn derive(time: &ServerTime, credentials: &Credentials) -> Self {
        let user_digest = md5_hex(&format!(
            "{}{}",
            time.as_str(),
            credentials.username().as_str()
        ));
        let password_digest = md5_hex(credentials.password().as_str());
        let digest = md5_hex(&format!("{user_digest}{SECRET}{password_digest}"));
        Self(format!("{}{digest}", time.as_str()))
    }

    /// Borrow the derived hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn md5_hex(input: &str) -> String {
    let digest = Md5::digest(input.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
