use crate::error::{NotifyError, Result};
use inote_common::types::OutboundMessage;
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION};
use std::time::Duration;

/// Upper bound for the whole request. The API call is the only blocking
/// operation in a run, so a hung server must not stall the notification
/// spooler indefinitely.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the IDERI note REST API.
///
/// One instance per run; issues a single basic-authenticated POST and maps
/// the response to the retry contract: 200 is success, everything else is a
/// retryable [`NotifyError::Api`].
pub struct ApiClient {
    base_url: String,
    username: String,
    password: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Builds the client. `insecure` disables TLS certificate verification
    /// for servers with self-signed certificates.
    pub fn new(base_url: &str, username: &str, password: &str, insecure: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        // Connection: close is an HTTP/1.1 contract; keep the client there.
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(insecure)
            .http1_only()
            .build()?;
        Ok(Self {
            base_url: base_url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            client,
        })
    }

    /// Endpoint for message creation.
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    /// Creates the message on the server.
    ///
    /// Prints a confirmation line on success. A non-200 response carries the
    /// status and response body back to the caller, which reports it and
    /// signals the platform to retry.
    pub async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let url = self.messages_url();
        tracing::debug!(%url, "calling API to create new message");
        if tracing::enabled!(tracing::Level::TRACE) {
            if let Ok(body) = serde_json::to_string_pretty(message) {
                tracing::trace!("message object used:\n{body}");
            }
        }

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(message)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(NotifyError::Api { status, body });
        }

        println!("IDERI note message created.");
        Ok(())
    }
}
