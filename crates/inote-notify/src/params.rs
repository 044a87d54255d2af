use crate::error::{NotifyError, Result};
use chrono::{DateTime, Duration, Utc};
use inote_common::context::EventContext;
use inote_common::types::OutboundMessage;

/// Configured message options carry this prefix; the segment after the last
/// underscore names the target message field.
const MSG_PARAM_PREFIX: &str = "PARAMETER_INOTE_MSG_";

/// The display-mode selector is matched on the full key because its suffix
/// (`SELECTION`) is not a message field.
const POPUP_OR_FS_KEY: &str = "PARAMETER_INOTE_MSG_POPUP_OR_FS_SELECTION";

/// Result of the ordered generic coercion: integer first, then the boolean
/// literals `True`/`False`, else the raw string.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Int(i64),
    Bool(bool),
    Text(String),
}

pub fn coerce(raw: &str) -> Coerced {
    if let Ok(n) = raw.trim().parse::<i64>() {
        return Coerced::Int(n);
    }
    match raw {
        "True" => Coerced::Bool(true),
        "False" => Coerced::Bool(false),
        _ => Coerced::Text(raw.to_string()),
    }
}

impl Coerced {
    fn as_flag(&self) -> bool {
        match self {
            Coerced::Bool(b) => *b,
            Coerced::Int(n) => *n != 0,
            Coerced::Text(s) => !s.is_empty(),
        }
    }

    fn into_text(self) -> String {
        match self {
            Coerced::Text(s) => s,
            Coerced::Int(n) => n.to_string(),
            Coerced::Bool(b) => b.to_string(),
        }
    }
}

/// Populates `message` from the `PARAMETER_INOTE_MSG_*` context entries.
///
/// Field-specific rules run before the generic coercion fallback: the
/// duration expands to `[now, now + minutes]`, recipient lists are split and
/// trimmed, the display-mode selector always forces the popup flag (the
/// parent container flag in the remote schema) in addition to the selected
/// one, and the addressing mode is an exact enum-name lookup. A non-integer
/// duration or unknown addressing mode aborts the run.
pub fn apply_parameters(
    ctx: &EventContext,
    message: &mut OutboundMessage,
    now: DateTime<Utc>,
) -> Result<()> {
    for (key, val) in ctx.iter() {
        if !key.starts_with(MSG_PARAM_PREFIX) {
            continue;
        }
        let name = key.rsplit('_').next().unwrap_or_default();
        tracing::trace!(key, "applying message parameter");

        if name == "DURATION" {
            let minutes: i64 = val
                .trim()
                .parse()
                .map_err(|_| NotifyError::InvalidDuration(val.to_string()))?;
            message.start_time_utc = now;
            message.end_time_utc = now + Duration::minutes(minutes);
        } else if name == "RECIPIENT" {
            message.recipient = split_list(val);
        } else if name == "EXCLUDE" {
            message.exclude = split_list(val);
        } else if key == POPUP_OR_FS_KEY {
            message.show_popup = true;
            assign_field(message, &val.to_uppercase(), Coerced::Bool(true));
        } else if name == "ADDRESSINGMODE" {
            message.addressing_mode = val
                .parse()
                .map_err(|_| NotifyError::UnknownAddressingMode(val.to_string()))?;
        } else {
            assign_field(message, name, coerce(val));
        }
    }
    Ok(())
}

/// Splits a comma-separated list, trimming each entry.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Assigns a coerced value to the message field of the given wire name.
/// Names that do not match a settable field are ignored, as are the fields
/// the mapper never writes generically (times, priority, id lists).
fn assign_field(message: &mut OutboundMessage, name: &str, value: Coerced) {
    match name {
        "TEXT" => message.text = value.into_text(),
        "LINKTARGET" => message.link_target = value.into_text(),
        "LINKTEXT" => message.link_text = value.into_text(),
        "NOTIFYRECEIVE" => message.notify_receive = value.as_flag(),
        "NOTIFYACKNOWLEDGE" => message.notify_acknowledge = value.as_flag(),
        "OPTNODELIVERYIFREVACK" => message.opt_no_delivery_if_rev_ack = value.as_flag(),
        "OPTNODELIVERYIFACKONOTHERCOMP" => {
            message.opt_no_delivery_if_ack_on_other_comp = value.as_flag()
        }
        "OPTNODELIVERYIFLOGGEDINAFTERMSGSTART" => {
            message.opt_no_delivery_if_logged_in_after_msg_start = value.as_flag()
        }
        "SHOWPOPUP" => message.show_popup = value.as_flag(),
        "SHOWTICKER" => message.show_ticker = value.as_flag(),
        "SHOWFULLSCREEN" => message.show_fullscreen = value.as_flag(),
        "SHOWFULLSCREENANDLOCK" => message.show_fullscreen_and_lock = value.as_flag(),
        "SHOWLINKMAXIMIZED" => message.show_link_maximized = value.as_flag(),
        "SHOWONWINLOGON" => message.show_on_win_logon = value.as_flag(),
        "SHOWONWINLOGONONLY" => message.show_on_win_logon_only = value.as_flag(),
        "HOMEOFFICEUSERSEXCLUDE" => message.home_office_users_exclude = value.as_flag(),
        "HOMEOFFICEUSERSONLY" => message.home_office_users_only = value.as_flag(),
        "NETWORKRANGEEXCLUDE" => message.network_range_exclude = value.as_flag(),
        "PUSH" => message.push = value.as_flag(),
        _ => tracing::debug!(name, "ignoring parameter with no matching message field"),
    }
}
