//! `pantry` - command-line session over the pantry inventory.
//!
//! Commands:
//! - `pantry list` - Show the pantry, grouped like the home screen
//! - `pantry add` - Add an item by hand
//! - `pantry edit` - Change an existing item
//! - `pantry discard` - Throw an item away
//! - `pantry scan` - Feed a barcode or detector label through the scan pipeline
//! - `pantry settings` - Show or change the expiration alert window
//! - `pantry onboard` - Mark onboarding as done

mod commands;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, DiscardArgs, EditArgs, ListArgs, ScanArgs, SettingsArgs};

/// Track what's in your pantry and when it goes off
#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding pantry.json (overrides PANTRY_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON instead of compact text
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the pantry
    List(ListArgs),

    /// Add an item by hand
    Add(AddArgs),

    /// Change an existing item
    Edit(EditArgs),

    /// Throw an item away
    Discard(DiscardArgs),

    /// Simulate a barcode or object detection
    Scan(ScanArgs),

    /// Show or change settings
    Settings(SettingsArgs),

    /// Mark onboarding as complete
    Onboard,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        pantry_observability::init();
    } else {
        pantry_observability::tracing::init(pantry_observability::LogFormat::Compact);
    }

    let ctx = context::Context::load(cli.data_dir, cli.json)?;

    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx),
        Commands::Add(args) => commands::add::run(args, &ctx),
        Commands::Edit(args) => commands::edit::run(args, &ctx),
        Commands::Discard(args) => commands::discard::run(args, &ctx),
        Commands::Scan(args) => commands::scan::run(args, &ctx),
        Commands::Settings(args) => commands::settings::run(args, &ctx),
        Commands::Onboard => commands::settings::onboard(&ctx),
    };

    ctx.flush_signals();

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scan_accepts_field_overrides() {
        let cli = Cli::try_parse_from([
            "pantry", "scan", "--quantity", "3", "--save", "object", "carrot",
        ])
        .unwrap();
        match cli.command {
            Commands::Scan(args) => {
                assert!(args.save);
                assert_eq!(args.fields.quantity, Some(3));
                assert!(matches!(args.command, commands::ScanCommand::Object { ref label } if label == "carrot"));
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn expires_on_and_expires_in_conflict() {
        let parsed = Cli::try_parse_from([
            "pantry", "add", "--name", "Milk", "--expires-on", "2024-05-01", "--expires-in", "3",
        ]);
        assert!(parsed.is_err());
    }
}
