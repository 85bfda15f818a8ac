//! rideboard — a ride-analytics dashboard with a webhook-backed assistant.
//!
//! One binary, two front ends over the same data and chat controller:
//!
//! - `rideboard web` serves an embedded single-page dashboard (metric cards,
//!   a two-series rides chart, location breakdown) with a floating chat
//!   widget that forwards questions to a configured webhook.
//! - `rideboard stats` / `rideboard ask` expose the same dataset and
//!   assistant from the terminal.
//!
//! The chat controller ([`chat::ChatSession`]) is a small synchronous state
//! machine over an injected transport, so the whole request/response/error
//! cycle is testable without a network.

pub mod chat;
pub mod cli;
pub mod config;
pub mod data;
pub mod web;
