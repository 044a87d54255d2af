use inote_common::context::EventContext;
use inote_notify::{require, NotifyError};

/// Connection settings for the IDERI note API, taken from the
/// `PARAMETER_INOTE_API_*` context entries.
#[derive(Debug)]
pub struct ApiConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Disable TLS certificate verification. Only the literal `True`
    /// enables this; absent or anything else keeps verification on.
    pub insecure: bool,
}

impl ApiConfig {
    pub fn from_context(ctx: &EventContext) -> Result<Self, NotifyError> {
        Ok(Self {
            url: require(ctx, "PARAMETER_INOTE_API_URL")?.to_string(),
            username: require(ctx, "PARAMETER_INOTE_API_USERNAME")?.to_string(),
            password: require(ctx, "PARAMETER_INOTE_API_USERPASS")?.to_string(),
            insecure: ctx.get("PARAMETER_INOTE_API_INSECURECONNECTION") == Some("True"),
        })
    }
}

/// Plugin log verbosity, configured through `PARAMETER_INOTE_PLUGIN_LOGLEVEL`
/// with the values the admin form offers (1, 2, 4, 8). Levels are cumulative:
/// each tier includes everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Standard,
    Verbose,
    Debug,
    Trace,
}

impl LogLevel {
    /// Unknown or missing values fall back to `Standard`.
    pub fn from_context(ctx: &EventContext) -> Self {
        match ctx
            .get("PARAMETER_INOTE_PLUGIN_LOGLEVEL")
            .map(str::trim)
        {
            Some("2") => LogLevel::Verbose,
            Some("4") => LogLevel::Debug,
            Some("8") => LogLevel::Trace,
            _ => LogLevel::Standard,
        }
    }

    /// Maximum `tracing` level for the subscriber. Debug and Trace both map
    /// to TRACE; Trace additionally dumps the raw context and payload.
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Standard => tracing::Level::INFO,
            LogLevel::Verbose => tracing::Level::DEBUG,
            LogLevel::Debug | LogLevel::Trace => tracing::Level::TRACE,
        }
    }

    pub fn dumps_context(self) -> bool {
        self == LogLevel::Trace
    }
}
