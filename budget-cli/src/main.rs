use anyhow::{bail, Result};
use budget_core::spending_summary;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod config;
mod import_cmd;
mod ledger_cmd;
mod llm;
mod preview;
mod state;

use ledger_cmd::{ExpenseCommand, IncomeCommand, KindFilter};

#[derive(Parser, Debug)]
#[command(
    name = "budget",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUDGET_BUILD_SHA"), ")"),
    about = "BudgetBuddy: personal budget tracker and statement importer"
)]
struct Cli {
    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a bank/UPI statement (PDF or extracted text) and preview its transactions
    Import {
        /// Statement file (.pdf, or any text file)
        file: PathBuf,

        /// Print the parsed transactions as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Only show the first N transactions
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Income entries
    Income {
        #[command(subcommand)]
        command: IncomeCommand,
    },

    /// Expense entries
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },

    /// List recorded entries, newest first
    List {
        #[arg(long, value_enum)]
        kind: Option<KindFilter>,
    },

    /// Delete an entry by id
    Delete { id: String },

    /// Totals and expenses by category group
    Breakdown,

    /// Show income categories and expense category groups
    Categories,

    /// Expenses of one category group, e.g. `budget category personal-care`
    Category {
        /// Group name or slug (Housing, Food, personal-care, ...)
        group: String,

        /// Print a plain-text receipt instead of the listing
        #[arg(long)]
        receipt: bool,
    },

    /// Ask the configured LLM for personalized savings suggestions
    Suggest {
        /// Your financial goals, e.g. "save 1 lakh for a bike by December"
        #[arg(long)]
        goals: String,

        /// Print the spending summary that would be sent, without calling the LLM
        #[arg(long)]
        dry_run: bool,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Store API keys for the savings advisor
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    PasteOpenaiApiKey,
    PasteAnthropicToken,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn open_ledger(cfg: &config::Config) -> Result<state::JsonLedgerStore> {
    let store = state::JsonLedgerStore::open(state::ledger_path(&cfg.ledger.file)?)?;
    tracing::debug!(path = %store.path().display(), "opened ledger");
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config()?;
    let user_id = cfg.ledger.user_id.clone();
    let now = chrono::Utc::now();

    match cli.command {
        Command::Import { file, json, limit } => {
            if !file.exists() {
                bail!("statement not found: {}", file.display());
            }
            let (text, txns) = import_cmd::preview_statement(&file)?;
            print!("{}", import_cmd::render_import(&text, &txns, json, limit)?);
        }

        Command::Income { command } => {
            let mut store = open_ledger(&cfg)?;
            let e = ledger_cmd::add_income(&mut store, &user_id, command, now)?;
            println!("Added income {}", ledger_cmd::format_entry(&e));
        }

        Command::Expense { command } => {
            let mut store = open_ledger(&cfg)?;
            let e = ledger_cmd::add_expense(&mut store, &user_id, command, now)?;
            println!("Added expense {}", ledger_cmd::format_entry(&e));
        }

        Command::List { kind } => {
            let store = open_ledger(&cfg)?;
            let entries = ledger_cmd::list_entries(&store, &user_id, kind)?;
            if entries.is_empty() {
                println!("No entries yet. Add one with `budget income add` or `budget expense add`.");
            }
            for e in &entries {
                println!("{}", ledger_cmd::format_entry(e));
            }
        }

        Command::Delete { id } => {
            let mut store = open_ledger(&cfg)?;
            ledger_cmd::delete_entry(&mut store, &user_id, &id)?;
            println!("Deleted {id}");
        }

        Command::Breakdown => {
            let store = open_ledger(&cfg)?;
            let entries = ledger_cmd::list_entries(&store, &user_id, None)?;
            print!("{}", ledger_cmd::render_breakdown(&entries));
        }

        Command::Categories => {
            print!("{}", ledger_cmd::render_categories());
        }

        Command::Category { group, receipt } => {
            let store = open_ledger(&cfg)?;
            let entries = ledger_cmd::list_entries(&store, &user_id, Some(KindFilter::Expense))?;
            let g = ledger_cmd::expenses_for_group(&entries, &group)?;
            if receipt {
                print!("{}", ledger_cmd::render_receipt(&g, &user_id, now));
            } else {
                print!("{}", ledger_cmd::render_group(&g));
            }
        }

        Command::Suggest { goals, dry_run } => {
            let store = open_ledger(&cfg)?;
            let entries = ledger_cmd::list_entries(&store, &user_id, None)?;
            let input = llm::SuggestionInput {
                spending_data: spending_summary(&entries),
                financial_goals: goals,
            };

            if dry_run {
                println!("{}", input.prompt());
                return Ok(());
            }

            let auth = auth::load_auth()?;
            let suggestions = llm::savings_suggestions(&cfg.llm, &auth, &input).await?;
            if suggestions.is_empty() {
                println!("The advisor did not return any suggestions. Try rephrasing your goals.");
            } else {
                println!("Here are your suggestions:\n");
                for s in &suggestions {
                    println!("- {s}");
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },

        Command::Auth { command } => match command {
            AuthCommand::PasteOpenaiApiKey => auth::openai_paste_api_key()?,
            AuthCommand::PasteAnthropicToken => auth::anthropic_paste_token()?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_import_flags() {
        let cli = Cli::try_parse_from(["budget", "import", "stmt.pdf", "--json", "--limit", "5"]).unwrap();
        match cli.command {
            Command::Import { file, json, limit } => {
                assert_eq!(file, PathBuf::from("stmt.pdf"));
                assert!(json);
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parses_expense_add() {
        let cli = Cli::try_parse_from([
            "budget", "expense", "add", "--name", "Rent", "--amount", "18000", "--category",
            "Rent / Mortgage",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Expense { .. }));
    }

    #[test]
    fn test_parses_category_receipt() {
        let cli = Cli::try_parse_from(["budget", "category", "personal-care", "--receipt"]).unwrap();
        match cli.command {
            Command::Category { group, receipt } => {
                assert_eq!(group, "personal-care");
                assert!(receipt);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
