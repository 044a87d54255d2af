//! Mapping and delivery logic for the IDERI note notification bridge.
//!
//! One Checkmk event flows through four steps: [`params::apply_parameters`]
//! fills the message record from configured options, [`link::attach_link`]
//! injects the optional deep link, [`template::compose_text`] builds the
//! message body and [`priority::for_event`] derives the severity. The
//! completed record is then handed to [`client::ApiClient`] for a single
//! authenticated POST.

pub mod client;
pub mod error;
pub mod form;
pub mod link;
pub mod params;
pub mod priority;
pub mod template;

#[cfg(test)]
mod tests;

pub use error::NotifyError;

use inote_common::context::EventContext;

/// Fetches a context variable, failing with [`NotifyError::MissingContext`]
/// when absent. Missing required context is a fatal input error.
pub fn require<'a>(ctx: &'a EventContext, key: &str) -> Result<&'a str, NotifyError> {
    ctx.get(key)
        .ok_or_else(|| NotifyError::MissingContext(key.to_string()))
}
