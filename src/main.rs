use anyhow::Result;
use clap::{Parser, Subcommand};

use rideboard::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "rideboard")]
#[command(about = "Ride analytics dashboard with a webhook-backed assistant")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the dashboard web UI (default: http://127.0.0.1:9748)
    Web {
        /// Bind address, e.g. 127.0.0.1:9748
        #[arg(long)]
        addr: Option<String>,
        /// Don't open the dashboard in a browser
        #[arg(long)]
        no_browser: bool,
    },
    /// Print the dashboard dataset to the terminal
    Stats {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Send one question to the analytics assistant and print the reply
    Ask {
        /// The question to ask
        #[arg(trailing_var_arg = true, required = true)]
        message: Vec<String>,
    },
    /// Check config resolution and webhook endpoint shape
    Health,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Web { addr, no_browser } => {
            let mut cfg = config::load();
            if let Some(addr) = addr {
                cfg.web.addr = addr;
            }
            if no_browser {
                cfg.web.open_browser = false;
            }
            web::serve(&cfg)
        }
        Commands::Stats { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt)
        }
        Commands::Ask { message } => {
            let message = message.join(" ");
            cli::run_ask(&message)
        }
        Commands::Health => cli::run_health(),
    }
}
