//! Integration tests for configuration loading.
//!
//! # Safety
//!
//! These tests use `std::env::set_var` / `remove_var`, which are `unsafe`
//! in Rust 2024 edition. They mutate process-wide environment variables, so
//! everything is combined into a single `#[test]` to avoid racing when
//! Cargo runs tests in parallel. The `unsafe` blocks are sound because no
//! other thread reads these variables concurrently.

use rideboard::config;

/// Helper: set an env var (wraps the `unsafe` call).
///
/// # Safety
/// Must only be called from single-threaded test contexts.
unsafe fn set_env(key: &str, val: &str) {
    unsafe { std::env::set_var(key, val) }
}

/// Helper: remove an env var (wraps the `unsafe` call).
///
/// # Safety
/// Must only be called from single-threaded test contexts.
unsafe fn remove_env(key: &str) {
    unsafe { std::env::remove_var(key) }
}

#[test]
fn env_overrides_take_precedence() {
    // --- baseline: defaults (no env vars set) ---
    unsafe {
        remove_env("RIDEBOARD_WEBHOOK_URL");
        remove_env("RIDEBOARD_WEBHOOK_TIMEOUT_MS");
        remove_env("RIDEBOARD_WEB_ADDR");
        remove_env("RIDEBOARD_WEB_OPEN_BROWSER");
    }
    let cfg = config::load();
    assert!(cfg.webhook.url.starts_with("https://"));
    assert_eq!(cfg.webhook.timeout_ms, 30_000);

    // --- webhook url override ---
    unsafe { set_env("RIDEBOARD_WEBHOOK_URL", "http://localhost:5678/webhook/test") };
    let cfg = config::load();
    assert_eq!(cfg.webhook.url, "http://localhost:5678/webhook/test");
    unsafe { remove_env("RIDEBOARD_WEBHOOK_URL") };

    // --- empty url override is ignored ---
    unsafe { set_env("RIDEBOARD_WEBHOOK_URL", "") };
    let cfg = config::load();
    assert!(cfg.webhook.url.starts_with("https://"));
    unsafe { remove_env("RIDEBOARD_WEBHOOK_URL") };

    // --- timeout override ---
    unsafe { set_env("RIDEBOARD_WEBHOOK_TIMEOUT_MS", "3000") };
    let cfg = config::load();
    assert_eq!(cfg.webhook.timeout_ms, 3000);
    unsafe { remove_env("RIDEBOARD_WEBHOOK_TIMEOUT_MS") };

    // --- unparseable timeout falls back ---
    unsafe { set_env("RIDEBOARD_WEBHOOK_TIMEOUT_MS", "soon") };
    let cfg = config::load();
    assert_eq!(cfg.webhook.timeout_ms, 30_000);
    unsafe { remove_env("RIDEBOARD_WEBHOOK_TIMEOUT_MS") };

    // --- bind address override ---
    unsafe { set_env("RIDEBOARD_WEB_ADDR", "0.0.0.0:8080") };
    let cfg = config::load();
    assert_eq!(cfg.web.addr, "0.0.0.0:8080");
    unsafe { remove_env("RIDEBOARD_WEB_ADDR") };

    // --- browser toggle ---
    unsafe { set_env("RIDEBOARD_WEB_OPEN_BROWSER", "0") };
    let cfg = config::load();
    assert!(!cfg.web.open_browser);
    unsafe { set_env("RIDEBOARD_WEB_OPEN_BROWSER", "true") };
    let cfg = config::load();
    assert!(cfg.web.open_browser);
    unsafe { remove_env("RIDEBOARD_WEB_OPEN_BROWSER") };
}
