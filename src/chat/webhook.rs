//! Webhook HTTP client — the production [`AssistantTransport`].
//!
//! Sends each submission to the configured endpoint as a JSON `POST` using
//! the synchronous `ureq` client:
//!
//! ```json
//! { "message": "<user text>", "timestamp": "<RFC 3339>" }
//! ```
//!
//! A 2xx response with a JSON body is a success; the display string is
//! pulled out of it by [`extract_reply`]. Everything else — connection
//! failure, timeout, non-2xx status, unparseable body — is a uniform
//! failure that the session renders as the fixed apology.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::config::WebhookConfig;

use super::{AssistantReply, AssistantTransport, OutboundPrompt, TrustedHtml};

/// Request body for the webhook `POST`.
#[derive(Debug, Serialize)]
struct WebhookRequest<'a> {
    message: &'a str,
    timestamp: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous webhook client. One request per submission, no retry, no
/// cancellation; the configured timeout is the only deadline.
#[derive(Debug)]
pub struct WebhookClient {
    url: String,
    timeout: Duration,
}

impl WebhookClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &WebhookConfig) -> Self {
        Self {
            url: config.url.trim().to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// The endpoint URL, for health output and logs.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AssistantTransport for WebhookClient {
    fn send(&self, prompt: &OutboundPrompt) -> Result<AssistantReply> {
        let body = WebhookRequest {
            message: &prompt.message,
            timestamp: prompt.timestamp.to_rfc3339(),
        };

        // Non-2xx statuses surface as Err from ureq, so transport failure
        // and server failure collapse into the same path here.
        let resp = ureq::post(&self.url)
            .timeout(self.timeout)
            .send_json(&body)
            .context("webhook request failed")?;

        let parsed: Value = resp
            .into_json()
            .context("failed to parse webhook response")?;

        // The endpoint is configured by the operator, which is the trust
        // assertion TrustedHtml requires.
        Ok(AssistantReply {
            html: TrustedHtml::assume_trusted(extract_reply(&parsed)),
        })
    }
}

/// Pull the display string out of a webhook response body.
///
/// Checks the `output` field, then `text`, then falls back to the whole
/// body re-serialized as compact JSON. Empty-string and non-string values
/// are treated as absent and fall through to the next step.
pub fn extract_reply(body: &Value) -> String {
    for key in ["output", "text"] {
        if let Some(Value::String(s)) = body.get(key)
            && !s.is_empty()
        {
            return s.clone();
        }
    }
    body.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_prefers_output() {
        let body = json!({ "output": "<p>42 rides</p>", "text": "ignored" });
        assert_eq!(extract_reply(&body), "<p>42 rides</p>");
    }

    #[test]
    fn extract_falls_back_to_text() {
        let body = json!({ "text": "plain answer" });
        assert_eq!(extract_reply(&body), "plain answer");
    }

    #[test]
    fn extract_falls_back_to_whole_body() {
        let body = json!({ "status": "ok", "count": 3 });
        let reply = extract_reply(&body);
        assert!(reply.contains("\"status\""));
        assert!(reply.contains("\"count\""));
    }

    #[test]
    fn empty_output_falls_through() {
        let body = json!({ "output": "", "text": "fallback" });
        assert_eq!(extract_reply(&body), "fallback");
    }

    #[test]
    fn non_string_output_falls_through() {
        let body = json!({ "output": 7, "text": "seven" });
        assert_eq!(extract_reply(&body), "seven");
    }

    #[test]
    fn non_object_body_is_serialized() {
        let body = json!([1, 2, 3]);
        assert_eq!(extract_reply(&body), "[1,2,3]");
    }

    #[test]
    fn client_from_default_config() {
        let config = WebhookConfig::default();
        let client = WebhookClient::from_config(&config);
        assert!(client.url().starts_with("https://"));
        assert_eq!(client.timeout, Duration::from_millis(30_000));
    }
}
