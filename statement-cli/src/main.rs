use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use statement_client::{ApiRef, HttpStatementApi, Session, StatementApi};
use statement_core::{LabelRequest, StatementSummary};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::state::AppHome;

mod config;
mod logging;
mod state;
mod table;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "statement",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("STATEMENT_BUILD_SHA"), ")"),
    about = "Upload bank statements, browse transactions, and label them"
)]
struct Cli {
    /// Backend address (overrides config)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bank selector sent with uploads (overrides config)
    #[arg(long, global = true)]
    bank: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a PDF statement and print one page of the parsed transactions
    Upload {
        file: PathBuf,

        /// Page to print (1-based, clamped to the last page)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Print every transaction as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Attach a label to a transaction on the backend
    Label {
        /// Transaction identifier (numbers are sent as numbers)
        #[arg(long)]
        id: String,

        #[arg(long)]
        label: String,
    },

    /// Interactive screen: upload, page through, and label transactions
    Tui {
        /// Statement to preselect
        file: Option<PathBuf>,
    },

    /// Manage ~/.statement-processor/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let home = AppHome::from_env()?;
    let cfg_path = home.config_file();
    let cfg = config::load_config(&cfg_path)?.with_overrides(cli.base_url, cli.bank);
    logging::init_logging(&home, &cfg.log)?;
    info!(base_url = %cfg.server.base_url, bank = %cfg.server.bank, "starting");

    match cli.command {
        Command::Upload { file, page, json } => {
            upload(cfg.api()?, &cfg.server.bank, file, page, json).await?;
        }

        Command::Label { id, label } => {
            send_label(&cfg.api()?, &id, &label).await?;
        }

        Command::Tui { file } => {
            let api: ApiRef = Arc::new(cfg.api()?);
            tui::run_tui(api, &cfg.server.bank, file)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                if config::init_config(&cfg_path)? {
                    println!("Wrote {}", cfg_path.display());
                } else {
                    println!("Config already exists: {}", cfg_path.display());
                }
            }
            ConfigCommand::Show => {
                println!("# {}\n", cfg_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

async fn upload(api: HttpStatementApi, bank: &str, file: PathBuf, page: usize, json: bool) -> Result<()> {
    let mut session = Session::new(api, bank);
    session.select_file(&file)?;
    session.submit().await?;

    let view = session.view();
    if let Some(err) = view.error() {
        bail!("{}", err);
    }

    if json {
        let rows = serde_json::to_string_pretty(view.transactions().rows()).context("serialize transactions")?;
        println!("{rows}");
        return Ok(());
    }

    for _ in 1..page {
        if !session.next_page() {
            break;
        }
    }

    let view = session.view();
    println!("Parsed {} transactions from {}\n", view.transactions().len(), file.display());
    print!("{}", table::render_page(view));
    if view.shows_table() {
        println!();
        print!("{}", table::render_summary(&StatementSummary::from_rows(view.transactions().rows())));
    }
    Ok(())
}

/// Numeric ids go out as JSON numbers, anything else as a string.
fn parse_id(id: &str) -> Value {
    id.parse::<u64>().map(Value::from).unwrap_or_else(|_| Value::from(id))
}

/// Body for a one-off label command; there is no loaded list to patch.
fn label_body(id: &str, label: &str) -> Result<LabelRequest> {
    if label.is_empty() {
        bail!("label must not be empty");
    }
    Ok(LabelRequest::new(parse_id(id), label))
}

async fn send_label(api: &HttpStatementApi, id: &str, label: &str) -> Result<()> {
    let body = label_body(id, label)?;
    api.update_label(&body)
        .await
        .with_context(|| format!("update label via {}", api.base_url()))?;
    println!("Saved label {:?} for transaction {}", body.label, body.transaction_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_stamp() {
        let sha = env!("STATEMENT_BUILD_SHA");
        assert!(sha == "unknown" || (sha.len() == 7 && sha.chars().all(|c| c.is_ascii_hexdigit())));
        assert!(Cli::command().render_version().contains(sha));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), serde_json::json!(42));
        assert_eq!(parse_id("txn-42"), serde_json::json!("txn-42"));
    }

    #[test]
    fn test_label_body() {
        let body = label_body("7", "fuel").unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "transactionId": 7, "label": "fuel" })
        );
        assert!(label_body("7", "").is_err());
    }

    #[test]
    fn test_upload_args() {
        let cli = Cli::try_parse_from(["statement", "--bank", "other", "upload", "may.pdf", "--page", "2"]).unwrap();
        assert_eq!(cli.bank.as_deref(), Some("other"));
        match cli.command {
            Command::Upload { file, page, json } => {
                assert_eq!(file, PathBuf::from("may.pdf"));
                assert_eq!(page, 2);
                assert!(!json);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
