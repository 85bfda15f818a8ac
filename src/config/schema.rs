//! Configuration schema and defaults.
//!
//! Defines the TOML-serializable structure with its two sections:
//! `[webhook]` and `[web]`. Every field has a built-in default, so users
//! only set the values they want to override.

use serde::{Deserialize, Serialize};

/// Default assistant endpoint. Override with `[webhook] url` or
/// `RIDEBOARD_WEBHOOK_URL` to point at your own workflow.
const DEFAULT_WEBHOOK_URL: &str =
    "https://daiwiikharihar17147.app.n8n.cloud/webhook-test/76144817-816c-476b-a2b5-1e33674469e8";

/// Default webhook request timeout in milliseconds.
const DEFAULT_WEBHOOK_TIMEOUT_MS: u64 = 30_000;

/// Default dashboard bind address.
const DEFAULT_WEB_ADDR: &str = "127.0.0.1:9748";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level rideboard configuration.
///
/// Maps directly to the `~/.rideboard/config.toml` and `.rideboard.toml`
/// file schemas. All sections and fields are optional — missing values fall
/// back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RideboardConfig {
    pub webhook: WebhookConfig,
    pub web: WebConfig,
}

// ---------------------------------------------------------------------------
// [webhook]
// ---------------------------------------------------------------------------

/// Assistant webhook settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Endpoint URL for chat submissions.
    pub url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout_ms: DEFAULT_WEBHOOK_TIMEOUT_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Dashboard server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address for `rideboard web`.
    pub addr: String,
    /// Open the dashboard in the default browser on startup.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_WEB_ADDR.to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = RideboardConfig::default();
        assert!(config.webhook.url.starts_with("https://"));
        assert_eq!(config.webhook.timeout_ms, 30_000);
        assert_eq!(config.web.addr, "127.0.0.1:9748");
        assert!(config.web.open_browser);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config: RideboardConfig = toml::from_str(
            r#"
            [webhook]
            timeout_ms = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.webhook.timeout_ms, 5000);
        assert!(config.webhook.url.starts_with("https://"));
        assert_eq!(config.web.addr, "127.0.0.1:9748");
    }

    #[test]
    fn round_trips_through_toml() {
        let config = RideboardConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: RideboardConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.webhook.url, config.webhook.url);
        assert_eq!(back.web.addr, config.web.addr);
    }
}
