//! Configuration loading.
//!
//! Layered hierarchy, later layers override earlier ones:
//!
//! 1. **Built-in defaults** — hardcoded in [`schema`]
//! 2. **User global config** — `~/.rideboard/config.toml`
//! 3. **Project local config** — `.rideboard.toml` in the current directory
//! 4. **Environment variables** — `RIDEBOARD_*` (highest precedence)
//!
//! Malformed files are silently ignored rather than aborting: a broken
//! config must never take the dashboard down with it.

pub mod schema;

use std::fs;
use std::path::PathBuf;

pub use schema::{RideboardConfig, WebConfig, WebhookConfig};

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved rideboard configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the entry point for every module that needs configuration.
pub fn load() -> RideboardConfig {
    let mut config = RideboardConfig::default();

    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Every field is `serde(default)`, so a file only needs the keys it wants
/// to change and the deserialized value is already a complete config —
/// replacing the previous layer wholesale is the merge.
fn load_toml_file(path: Option<PathBuf>) -> Option<RideboardConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Apply `RIDEBOARD_*` environment-variable overrides.
fn apply_env_overrides(config: &mut RideboardConfig) {
    if let Ok(val) = std::env::var("RIDEBOARD_WEBHOOK_URL")
        && !val.is_empty()
    {
        config.webhook.url = val;
    }

    if let Ok(val) = std::env::var("RIDEBOARD_WEBHOOK_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.webhook.timeout_ms = ms;
    }

    if let Ok(val) = std::env::var("RIDEBOARD_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }

    if let Ok(val) = std::env::var("RIDEBOARD_WEB_OPEN_BROWSER") {
        config.web.open_browser = matches!(
            val.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.rideboard/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rideboard").join("config.toml"))
}

/// Path to the project local config: `.rideboard.toml` in the current
/// directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".rideboard.toml"))
}

/// The global config file path, for display in `rideboard health`.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// The project config file path, for display in `rideboard health`.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}
