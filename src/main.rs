use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{handle_expense_command, handle_export_command, ExpenseCommands, ExportArgs};
use expense_tracker::config::logging::{init_logging, LogTarget};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Record what you spend from the command line or an interactive \
                  table. Every change is written straight to a plain CSV file \
                  you can open in any spreadsheet."
)]
struct Cli {
    /// Use this CSV file instead of the default data file
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Export all expenses to CSV, JSON or YAML
    Export(ExportArgs),

    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let mut paths = ExpensePaths::new()?;
    if let Some(file) = cli.file {
        paths = paths.with_data_file(file);
    }
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    // The TUI owns the terminal, so its diagnostics go to a file
    let log_target = match cli.command {
        Some(Commands::Tui) => LogTarget::File(paths.log_file()),
        _ => LogTarget::Stderr,
    };
    init_logging(&settings, log_target)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, args)?;
        }
        Some(Commands::Tui) => {
            expense_tracker::tui::run_tui(&storage, &settings)?;
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data file:      {}", paths.expenses_file_display().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Categories:       {}", settings.categories.join(", "));
            println!("  Export file:      {}", settings.default_export_file);
            println!("  Confirm delete:   {}", settings.confirm_delete);
            println!("  Log level:        {}", settings.log_level);
        }
        None => {
            println!("Expense Tracker - personal expenses in a plain CSV file");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
