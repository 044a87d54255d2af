//! Checkmk notification script for IDERI note.
//!
//! Invoked once per notification event with the event context in `NOTIFY_*`
//! environment variables. Exit code 0 means the message was created, 1 tells
//! Checkmk to retry later, 2 is a permanent configuration or input error.
//! `notify-inote form` prints the parameter form schema as JSON instead of
//! sending anything.

mod config;

use std::process::ExitCode;

use chrono::Utc;
use config::{ApiConfig, LogLevel};
use inote_common::context::EventContext;
use inote_common::types::OutboundMessage;
use inote_notify::client::ApiClient;
use inote_notify::{form, link, params, priority, template, NotifyError};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::args().nth(1).as_deref() == Some("form") {
        return print_form_schema();
    }

    let ctx = EventContext::from_env();
    let level = LogLevel::from_context(&ctx);
    init_logging(level);

    match run(&ctx, level).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(NotifyError::Api { status, body }) => {
            eprintln!("Failed to send IDERI note message. Status: {status}, Response: {body}");
            ExitCode::from(1)
        }
        Err(err) if err.is_retryable() => {
            eprintln!("Failed to send IDERI note message. {err}");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}

async fn run(ctx: &EventContext, level: LogLevel) -> Result<(), NotifyError> {
    if level.dumps_context() {
        tracing::trace!("values passed to the plugin (NOTIFY_ variables):");
        for (key, val) in ctx.iter() {
            tracing::trace!("{key}={val}");
        }
        tracing::trace!("--- end of NOTIFY_ variables ---");
    }

    let api = ApiConfig::from_context(ctx)?;

    let now = Utc::now();
    let mut message = OutboundMessage::new(now);
    params::apply_parameters(ctx, &mut message, now)?;
    link::attach_link(ctx, &mut message)?;
    message.text = template::compose_text(ctx)?;
    message.priority = priority::for_event(ctx)?;

    let client = ApiClient::new(&api.url, &api.username, &api.password, api.insecure)?;
    client.send(&message).await
}

/// Diagnostic lines go to stdout; Checkmk appends them to its notification
/// log. `RUST_LOG` can still override the configured level.
fn init_logging(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.tracing_level()).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_form_schema() -> ExitCode {
    match serde_json::to_string_pretty(&form::parameter_form()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: failed to serialize form schema: {err}");
            ExitCode::from(2)
        }
    }
}
