//! CLI command for data export

use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::error::ExpenseResult;
use crate::export::ExportFormat;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (defaults to the configured export file)
    pub output: Option<PathBuf>,

    /// Export format (guessed from the file extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    args: ExportArgs,
) -> ExpenseResult<()> {
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&settings.default_export_file));
    let format = args
        .format
        .unwrap_or_else(|| ExportFormat::from_path(&output));

    let count = ExpenseService::new(storage).export_to(&output, format)?;

    println!(
        "Exported {} expenses as {} to: {}",
        count,
        format,
        output.display()
    );

    Ok(())
}
