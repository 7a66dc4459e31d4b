//! CLI command for CSV export

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::ExpenseService;
use crate::storage::LedgerStore;

/// Message shown when the ledger has nothing to export
pub const NOTHING_TO_EXPORT: &str = "No expenses to export!";

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(
    store: &LedgerStore,
    settings: &Settings,
    args: ExportArgs,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(store, settings);

    let Some(csv) = service.export()? else {
        // stdout stays empty so redirected output is empty too
        eprintln!("{}", NOTHING_TO_EXPORT);
        return Ok(());
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, &csv).map_err(|e| {
                ExpenseError::Export(format!("Failed to write {}: {}", path.display(), e))
            })?;
            info!("Exported ledger to {}", path.display());
            println!("Exported to {}", path.display());
        }
        None => {
            io::stdout()
                .write_all(csv.as_bytes())
                .map_err(|e| ExpenseError::Export(format!("Failed to write output: {}", e)))?;
        }
    }

    Ok(())
}
