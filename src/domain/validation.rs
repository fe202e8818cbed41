use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MessageIdOutOfRange { max: u16, actual: u16 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MessageIdOutOfRange { max, actual } => {
                write!(f, "message id out of range: {actual} (max {max})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
