use std::fmt;

use rand::Rng as _;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Email Office account user name.
///
/// Invariant: non-empty after trimming.
pub struct UserName(String);

impl UserName {
    /// XML tag used by the connector (`UserName`).
    pub const FIELD: &'static str = "UserName";

    /// Create a validated [`UserName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated user name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Email Office account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed). The
/// password never travels on the wire; only its digest enters the auth hash.
pub struct Password(String);

impl Password {
    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account credentials for authenticated commands.
pub struct Credentials {
    username: UserName,
    password: Password,
}

impl Credentials {
    /// Create validated credentials from a user name / password pair.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: UserName::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number as sent to the connector (`Phone`).
///
/// Invariant: non-empty after trimming. This type does not normalize; the
/// connector expects numbers already in international format, and number
/// normalization is the caller's concern.
pub struct Recipient(String);

impl Recipient {
    /// XML tag used by the connector (`Phone`).
    pub const FIELD: &'static str = "Phone";

    /// Create a validated (non-empty) recipient number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Trimmed value as sent to the connector.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Custom sender id (`SenderNr`).
///
/// Invariant: non-empty after trimming. The value must be enabled for your
/// Email Office account.
pub struct SenderId(String);

impl SenderId {
    /// XML tag used by the connector (`SenderNr`).
    pub const FIELD: &'static str = "SenderNr";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`Line`).
///
/// Invariant: non-empty after trimming. The original value (including
/// whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// XML tag used by the connector (`Line`).
    pub const FIELD: &'static str = "Line";

    /// Number of characters that fit into a single message part.
    pub const PART_LEN: u32 = 160;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of 160-character parts this text occupies, at least 1.
    pub fn parts(&self) -> u32 {
        (self.0.chars().count() as u32).div_ceil(Self::PART_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Server timestamp token extracted from `<SMS_time>`.
///
/// Invariant: non-empty after trimming. The token is opaque; it is only ever
/// echoed back into the auth hash of the command that follows.
pub struct ServerTime(String);

impl ServerTime {
    /// XML tag used by the connector (`SMS_time`).
    pub const FIELD: &'static str = "SMS_time";

    /// Create a validated [`ServerTime`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message id embedded in `<SMS_ID>`.
///
/// Invariant: `0..=32767`; the connector's field is a signed 16-bit integer.
/// Ids are not guaranteed unique across sends; the provider deduplicates on
/// its side.
pub struct MessageId(u16);

impl MessageId {
    /// XML tag used by the connector (`SMS_ID`).
    pub const FIELD: &'static str = "SMS_ID";

    /// Largest id representable in the connector's signed 16-bit field.
    pub const MAX: u16 = i16::MAX as u16;

    /// Create a validated [`MessageId`].
    pub fn new(value: u16) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::MessageIdOutOfRange {
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Draw a random id from the valid range.
    pub fn random() -> Self {
        Self(rand::rng().random_range(0..=Self::MAX))
    }

    /// Get the underlying id.
    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Remaining sendable message units as reported by `<SMS_quota>`.
pub struct Balance(u32);

impl Balance {
    /// XML tag used by the connector (`SMS_quota`).
    pub const FIELD: &'static str = "SMS_quota";

    /// Wrap a unit count.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the remaining unit count.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Subtract consumed units, clamping at zero.
    pub fn debit(self, units: u32) -> Self {
        Self(self.0.saturating_sub(units))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
