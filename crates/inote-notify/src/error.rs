/// Errors raised while building or delivering a message.
///
/// Input errors abort the run before anything is sent; transport and API
/// errors signal the invoking platform to retry. [`NotifyError::is_retryable`]
/// is what the binary maps to its exit code.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A required context variable was not supplied by the platform.
    #[error("missing required context variable '{0}'")]
    MissingContext(String),

    /// The message duration parameter was not a whole number of minutes.
    #[error("invalid message duration '{0}': expected whole minutes")]
    InvalidDuration(String),

    /// The addressing mode parameter did not name a known mode.
    #[error("unknown addressing mode '{0}'")]
    UnknownAddressingMode(String),

    /// The HTTP request could not be built or completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-200 status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },
}

impl NotifyError {
    /// Whether the invoking platform should retry the notification.
    /// Delivery failures are retryable; malformed input never is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, NotifyError::Http(_) | NotifyError::Api { .. })
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
