use crate::error::Result;
use crate::require;
use inote_common::context::EventContext;
use inote_common::types::OutboundMessage;

/// Fixed label for the injected deep link.
pub const LINK_TEXT: &str = "Show in Checkmk";

/// Attaches a deep link to the host or service page in the Checkmk web
/// console, if a console URL is configured.
///
/// Full-screen messages cannot display links, so when either full-screen
/// flag is set the link fields stay empty regardless of configuration. A
/// configured console URL with the site or page path missing from the
/// context is a fatal input error.
pub fn attach_link(ctx: &EventContext, message: &mut OutboundMessage) -> Result<()> {
    let Some(base_url) = ctx.get("PARAMETER_CHECKMKURL") else {
        return Ok(());
    };
    if message.show_fullscreen || message.show_fullscreen_and_lock {
        tracing::debug!("full-screen display selected, link suppressed");
        return Ok(());
    }

    let page = match ctx.get("WHAT") {
        Some("HOST") => require(ctx, "HOSTURL")?,
        Some("SERVICE") => require(ctx, "SERVICEURL")?,
        _ => return Ok(()),
    };
    let site = require(ctx, "OMD_SITE")?;

    message.link_target = format!("{base_url}/{site}/{page}");
    message.link_text = LINK_TEXT.to_string();
    tracing::debug!(target = %message.link_target, "added console link to message");
    Ok(())
}
