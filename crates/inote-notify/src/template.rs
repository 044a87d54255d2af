use crate::error::Result;
use crate::require;
use inote_common::context::EventContext;
use regex::Regex;
use std::sync::LazyLock;

/// Body template for host events.
const HOST_TEXT: &str = "\
[$NOTIFICATIONTYPE$]
Host $HOSTNAME$ is $HOSTSTATE$.

Host:     $HOSTNAME$ ($HOSTALIAS$)
IPv4:     $HOST_ADDRESS_4$
IPv6:     $HOST_ADDRESS_6$
Event:    $EVENT_TXT$

Output:   $HOSTOUTPUT$
";

/// Body template for service events.
const SERVICE_TEXT: &str = "\
[$NOTIFICATIONTYPE$]
Service $SERVICEDESC$ on $HOSTNAME$ is $SERVICESTATE$.

Host:     $HOSTNAME$ ($HOSTALIAS$)
IPv4:     $HOST_ADDRESS_4$
IPv6:     $HOST_ADDRESS_6$
Service:  $SERVICEDESC$
Event:    $EVENT_TXT$

Output:   $SERVICEOUTPUT$
";

static LEFTOVER_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[A-Z_][A-Z_0-9]*\$").expect("placeholder pattern is valid"));

/// Replaces every `$KEY$` placeholder with the matching context value, then
/// removes any placeholder that stayed unresolved (Checkmk convention).
pub fn substitute(template: &str, ctx: &EventContext) -> String {
    let mut out = template.to_string();
    for (key, val) in ctx.iter() {
        out = out.replace(&format!("${key}$"), val);
    }
    LEFTOVER_PLACEHOLDER.replace_all(&out, "").into_owned()
}

/// Event phrase template for a notification type. `@` stands for the entity
/// word (`HOST` or `SERVICE`) and is substituted before the placeholder pass.
fn event_phrase(notification_type: &str) -> String {
    if notification_type == "PROBLEM" || notification_type == "RECOVERY" {
        "$PREVIOUS@HARDSHORTSTATE$ -> $@SHORTSTATE$".to_string()
    } else if notification_type.starts_with("FLAP") {
        if notification_type.contains("START") {
            "Started Flapping".to_string()
        } else {
            "Stopped Flapping ($@SHORTSTATE$)".to_string()
        }
    } else if let Some(what) = notification_type.strip_prefix("DOWNTIME") {
        format!("Downtime {} ($@SHORTSTATE$)", title_case(what))
    } else if notification_type == "ACKNOWLEDGEMENT" {
        "Acknowledged ($@SHORTSTATE$) by $@ACKAUTHOR$Comment:  ".to_string()
    } else if notification_type == "CUSTOM" {
        "Custom Notification ($@SHORTSTATE$)".to_string()
    } else {
        // Unknown types pass through verbatim; the platform does not emit any.
        notification_type.to_string()
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Composes the human-readable message body for one event.
///
/// The event phrase is selected by notification type, bound to the host or
/// service entity, substituted against the context and spliced into the
/// host- or service-oriented body template.
pub fn compose_text(ctx: &EventContext) -> Result<String> {
    tracing::debug!("composing message text");
    let what = require(ctx, "WHAT")?;
    let notification_type = require(ctx, "NOTIFICATIONTYPE")?;

    let event_txt = substitute(&event_phrase(notification_type).replace('@', what), ctx);

    let template = if what == "HOST" { HOST_TEXT } else { SERVICE_TEXT };
    Ok(substitute(&template.replace("$EVENT_TXT$", &event_txt), ctx))
}
