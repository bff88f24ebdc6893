use std::fmt;

#[derive(Debug)]
pub enum CalChatError {
    /// Malformed caller input (missing fields, bad dates).
    Validation(String),
    /// The scheduling provider returned a failure or an unparseable body.
    Provider {
        status: Option<u16>,
        message: String,
    },
    /// The language-model call failed.
    Model {
        status: Option<u16>,
        message: String,
    },
    /// The model requested a function that is not in the registry.
    UnknownFunction(String),
    /// The model supplied arguments that fail schema validation.
    InvalidArguments(String),
    /// The function-call loop hit its round cap without a final reply.
    RoundLimitExceeded(usize),
    ConfigError(String),
    NetworkError(reqwest::Error),
    JsonError(serde_json::Error),
    Other(String),
}

impl fmt::Display for CalChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalChatError::Validation(msg) => write!(f, "Validation error: {}", msg),
            CalChatError::Provider { status, message } => match status {
                Some(code) => write!(f, "Scheduling provider error (status {}): {}", code, message),
                None => write!(f, "Scheduling provider error: {}", message),
            },
            CalChatError::Model { status, message } => match status {
                Some(code) => write!(f, "Model API error (status {}): {}", code, message),
                None => write!(f, "Model API error: {}", message),
            },
            CalChatError::UnknownFunction(name) => write!(f, "Unknown function: {}", name),
            CalChatError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            CalChatError::RoundLimitExceeded(max) => {
                write!(f, "Function-call round limit ({}) exceeded", max)
            }
            CalChatError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CalChatError::NetworkError(e) => write!(f, "Network error: {}", e),
            CalChatError::JsonError(e) => write!(f, "JSON error: {}", e),
            CalChatError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CalChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalChatError::NetworkError(e) => Some(e),
            CalChatError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CalChatError {
    fn from(err: reqwest::Error) -> Self {
        CalChatError::NetworkError(err)
    }
}

impl From<serde_json::Error> for CalChatError {
    fn from(err: serde_json::Error) -> Self {
        CalChatError::JsonError(err)
    }
}

impl From<String> for CalChatError {
    fn from(msg: String) -> Self {
        CalChatError::Other(msg)
    }
}

impl From<&str> for CalChatError {
    fn from(msg: &str) -> Self {
        CalChatError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalChatError>;
