//! Single-user book catalog manager for the command line.
//!
//! Loads the catalog document, then drops into an interactive menu that
//! drives the library operations. The menu is a thin collaborator; all
//! validation and persistence lives in `crates/catalog`.

mod menu;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shelfmark_catalog::{CatalogStore, Library};
use shelfmark_config::Settings;

/// Manage a personal book catalog from an interactive menu.
#[derive(Debug, Parser)]
#[command(name = "shelfmark", version, about)]
struct Cli {
    /// Path to the catalog document (overrides configuration).
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to an alternative configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("fatal: {err}");
            return ExitCode::FAILURE;
        }
    };
    let path = cli.file.unwrap_or(settings.storage_file);
    tracing::info!(path = %path.display(), "opening catalog");

    let library = match Library::open(CatalogStore::new(&path), menu::ask_recovery) {
        Ok(library) => library.with_max_year(settings.max_year),
        Err(err) => {
            eprintln!("fatal: {err}");
            return ExitCode::FAILURE;
        }
    };

    match menu::run(library) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // A failed persist means memory and disk no longer agree;
            // stopping is the only honest option left.
            eprintln!("fatal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}
