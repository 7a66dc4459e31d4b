use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use expense_ledger::cli::{
    handle_expense_command, handle_export_command, handle_ledger_command,
    handle_summary_command, ExpenseCommands, ExportArgs, LedgerCommands, SummaryCommands,
};
use expense_ledger::config::{paths::LedgerPaths, settings::Settings};
use expense_ledger::storage::{init::initialize_storage, LedgerStore};

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Business expense ledger with monthly, category and payment-mode summaries",
    long_about = "Records business expenses in a ledger file and keeps monthly, \
                  per-category and per-payment-mode totals next to them. Every \
                  change rewrites the ledger and its summaries in one atomic save."
)]
struct Cli {
    /// Ledger file to use instead of the default ledger
    #[arg(long, global = true, env = "EXPENSE_LEDGER_FILE")]
    ledger: Option<PathBuf>,

    /// Log level for messages on stderr (overridden by RUST_LOG)
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the home directory, settings and the default ledger
    Init,

    /// Show current configuration and paths
    Config,

    /// Ledger file management
    #[command(subcommand)]
    Ledger(LedgerCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Spending summaries
    #[command(subcommand)]
    Summary(SummaryCommands),

    /// Export the ledger as CSV
    Export(ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let ledger_path = cli
        .ledger
        .clone()
        .unwrap_or_else(|| paths.ledger_file(&settings.default_ledger));

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing expense ledger at: {}", paths.base_dir().display());
            let store = initialize_storage(&paths, &settings.default_ledger)?;
            if !paths.is_initialized() {
                settings.save(&paths)?;
            }
            println!("Initialization complete!");
            println!("Default ledger: {}", store.path().display());
            println!();
            println!("Run 'expenses expense add --help' to record your first expense.");
        }
        Some(Commands::Config) => {
            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Home directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Ledger directory: {}", paths.ledgers_dir().display());
            println!("Active ledger:    {}", ledger_path.display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Default ledger:  {}", settings.default_ledger);
            println!("  Categories:      {}", settings.categories.join(", "));
            println!("  Payment modes:   {}", settings.payment_modes.join(", "));
        }
        Some(Commands::Ledger(cmd)) => {
            handle_ledger_command(&paths, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let store = LedgerStore::open(&ledger_path)?;
            handle_expense_command(&store, &settings, cmd)?;
        }
        Some(Commands::Summary(cmd)) => {
            let store = LedgerStore::open(&ledger_path)?;
            handle_summary_command(&store, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let store = LedgerStore::open(&ledger_path)?;
            handle_export_command(&store, &settings, args)?;
        }
        None => {
            println!("Expense Ledger - business expense tracking");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses init' to get started.");
        }
    }

    Ok(())
}

/// Route `tracing` output to stderr. `RUST_LOG` wins when set; otherwise
/// `level` applies to this crate only.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "expense_ledger={},{}={}",
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
