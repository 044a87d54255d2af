use crate::error::Result;
use crate::require;
use inote_common::context::EventContext;
use inote_common::types::Priority;

/// Maps a Checkmk host state to a message priority. Total: anything
/// unrecognized is treated as a warning.
pub fn from_host_state(state: &str) -> Priority {
    match state {
        "UP" => Priority::Information,
        "DOWN" => Priority::Alert,
        "UNREACHABLE" => Priority::Warning,
        _ => Priority::Warning,
    }
}

/// Maps a Checkmk service state to a message priority. Total: anything
/// unrecognized is treated as a warning.
pub fn from_service_state(state: &str) -> Priority {
    match state {
        "OK" => Priority::Information,
        "WARNING" => Priority::Warning,
        "CRITICAL" => Priority::Alert,
        "UNKNOWN" => Priority::Warning,
        _ => Priority::Warning,
    }
}

/// Derives the priority for the event from its host or service state.
pub fn for_event(ctx: &EventContext) -> Result<Priority> {
    let priority = if require(ctx, "WHAT")? == "HOST" {
        from_host_state(require(ctx, "HOSTSTATE")?)
    } else {
        from_service_state(require(ctx, "SERVICESTATE")?)
    };
    tracing::debug!(%priority, "derived message priority from state");
    Ok(priority)
}
