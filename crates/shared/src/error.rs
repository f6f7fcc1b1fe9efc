use thiserror::Error;

/// Message shown for every failure that never reached the application layer.
pub const COMMUNICATION_ERROR: &str = "Error communicating with the server";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network failure, unreadable body, or a success envelope without data.
    #[error("{}", COMMUNICATION_ERROR)]
    Transport,
    /// The server answered `success: false`; its message is passed through.
    #[error("{0}")]
    Application(String),
}

impl ApiError {
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application(message.into())
    }

    /// Text shown to the user for this failure.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport => COMMUNICATION_ERROR,
            ApiError::Application(message) => message,
        }
    }
}
