//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `rideboard stats` — the dashboard dataset as a terminal report
//! - `rideboard ask "question"` — one-shot chat against the webhook
//! - `rideboard health` — config resolution and webhook sanity checks
//!
//! `rideboard web` lives in [`crate::web`].

use anyhow::Result;
use colored::Colorize;

use crate::chat::webhook::WebhookClient;
use crate::chat::{ChatSession, Message, MessageBody};
use crate::config;
use crate::data::{self, Trend};

/// Output format for the stats command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// rideboard stats
// ---------------------------------------------------------------------------

/// Print the dashboard dataset in the requested format.
pub fn run_stats(format: OutputFormat) -> Result<()> {
    let dataset = data::sample();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dataset)?),
        OutputFormat::Csv => print_stats_csv(&dataset),
        OutputFormat::Table => print_stats_table(&dataset),
    }

    Ok(())
}

fn print_stats_table(dataset: &data::DashboardData) {
    println!("{}", "Ride Analytics Report".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    // Headline metrics
    for metric in &dataset.metrics {
        let delta = match metric.trend {
            Trend::Up => metric.delta.green(),
            Trend::Down => metric.delta.red(),
        };
        println!(
            "  {:<16} {:>10}   {}",
            format!("{}:", metric.label).bold(),
            metric.value,
            delta
        );
    }
    println!();

    // Rides over time
    println!("{}", "Rides Over Time".bold().cyan());
    println!("  {:<8} {:>7} {:>7}", "Date", "Rides", "Surge");
    for point in &dataset.rides_over_time {
        println!("  {:<8} {:>7} {:>7}", point.date, point.rides, point.surge);
    }
    println!();

    // Top locations
    println!("{}", "Top Locations".bold().cyan());
    for location in &dataset.top_locations {
        println!(
            "  {:<20} {:>8} rides  {:>5.1}%",
            location.name,
            format_number(location.rides),
            location.percentage
        );
    }
    println!();

    // Customer segments
    println!("{}", "Customer Segments".bold().cyan());
    for segment in &dataset.customer_segments {
        println!("  {:<20} {:>3}%", segment.name, segment.share_pct);
    }
    println!();

    // Performance overview
    let perf = &dataset.performance;
    println!("{}", "Performance Overview".bold().cyan());
    println!("  {} {}", "Average rating: ".bold(), perf.average_rating);
    println!(
        "  {} {}%",
        "Completion rate:".bold(),
        perf.completion_rate_pct
    );
    println!(
        "  {} {} min",
        "Avg. wait time: ".bold(),
        perf.avg_wait_minutes
    );
}

fn print_stats_csv(dataset: &data::DashboardData) {
    println!("section,name,value,extra");
    for metric in &dataset.metrics {
        // Display values can contain commas ("12,847"), so quote them.
        println!(
            "metric,{},\"{}\",{}",
            metric.label, metric.value, metric.delta
        );
    }
    for point in &dataset.rides_over_time {
        println!("rides,{},{},{}", point.date, point.rides, point.surge);
    }
    for location in &dataset.top_locations {
        println!(
            "location,{},{},{:.1}",
            location.name, location.rides, location.percentage
        );
    }
    for segment in &dataset.customer_segments {
        println!("segment,{},{},", segment.name, segment.share_pct);
    }
    let perf = &dataset.performance;
    println!("performance,average_rating,{},", perf.average_rating);
    println!("performance,completion_rate_pct,{},", perf.completion_rate_pct);
    println!("performance,avg_wait_minutes,{},", perf.avg_wait_minutes);
}

// ---------------------------------------------------------------------------
// rideboard ask
// ---------------------------------------------------------------------------

/// Run a single chat cycle against the configured webhook and print the
/// exchange.
pub fn run_ask(message: &str) -> Result<()> {
    let cfg = config::load();
    let client = WebhookClient::from_config(&cfg.webhook);
    let mut session = ChatSession::new();

    if !session.submit(message, &client) {
        println!("{}", "Nothing to ask — the message is empty.".yellow());
        return Ok(());
    }

    // Print the prompt and whatever came back (reply or the apology).
    for entry in session.messages().iter().skip(1) {
        print_message(entry);
    }

    Ok(())
}

fn print_message(message: &Message) {
    let who = if message.is_user() {
        "you".bold().cyan()
    } else {
        "assistant".bold().green()
    };
    let text = match &message.body {
        MessageBody::Plain(text) => text.clone(),
        MessageBody::Html(html) => html.strip_tags(),
    };
    println!("{who}: {text}");
}

// ---------------------------------------------------------------------------
// rideboard health
// ---------------------------------------------------------------------------

/// Check configuration resolution and webhook endpoint shape.
pub fn run_health() -> Result<()> {
    println!("{}", "Rideboard Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.rideboard/config.toml found"
        } else {
            "not found (defaults in effect)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".rideboard.toml found"
        } else {
            "none (optional)"
        },
    );

    let url_ok = cfg.webhook.url.starts_with("http://") || cfg.webhook.url.starts_with("https://");
    print_health_item(
        "Webhook URL",
        url_ok,
        if url_ok {
            &cfg.webhook.url
        } else {
            "not an http(s) URL — chat submissions will fail"
        },
    );
    print_health_item(
        "Webhook timeout",
        cfg.webhook.timeout_ms > 0,
        &format!("{} ms", cfg.webhook.timeout_ms),
    );
    print_health_item("Dashboard addr", true, &cfg.web.addr);

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<16} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Insert thousands separators: 3247 → "3,247".
fn format_number(n: u32) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str_opt(Some("table")), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(
            OutputFormat::from_str_opt(Some("bogus")),
            OutputFormat::Table
        );
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(3247), "3,247");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}
