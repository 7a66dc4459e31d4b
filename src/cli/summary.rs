//! Summary CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_summary, format_summary_bundle};
use crate::error::ExpenseResult;
use crate::services::ExpenseService;
use crate::storage::LedgerStore;

/// Summary subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum SummaryCommands {
    /// Total spend per month
    Monthly,
    /// Total spend per category
    Category,
    /// Total spend per payment mode
    #[command(alias = "payment-mode")]
    Payment,
    /// All three summaries
    All,
}

/// Handle a summary command
pub fn handle_summary_command(
    store: &LedgerStore,
    settings: &Settings,
    cmd: SummaryCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(store, settings);
    let bundle = service.summaries()?;
    let currency = settings.currency_symbol.as_str();

    let output = match cmd {
        SummaryCommands::Monthly => format_summary(&bundle.monthly, currency),
        SummaryCommands::Category => format_summary(&bundle.by_category, currency),
        SummaryCommands::Payment => format_summary(&bundle.by_payment_mode, currency),
        SummaryCommands::All => format_summary_bundle(&bundle, currency),
    };

    print!("{}", output);
    Ok(())
}
