//! CLI binary for `deskmate`.
//!
//! This binary is a thin wrapper that loads config and state and delegates
//! to the library.

use std::process::ExitCode;

use clap::Parser;
use deskmate::app::App;
use deskmate::cli::{run, run_utility, Cli, CliOutput, RunOptions, TerminalConfirm};
use deskmate::config::AppConfig;
use deskmate::present::Presenter;
use deskmate::storage::SqliteStore;
use deskmate::traits::{AssumeYes, Confirm};
use deskmate::{logging, paths, templates};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(data_dir) = paths::data_dir() else {
        eprintln!("Error: could not determine the data directory (set DESKMATE_HOME)");
        return ExitCode::from(1);
    };

    if let Some(output) = run_utility(&cli.command, &data_dir) {
        return emit(output);
    }

    let config = match AppConfig::load_or_default(&data_dir) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: Could not load config: {e}");
            AppConfig::default()
        }
    };

    if config.file_logging {
        if let Err(e) = logging::init_logging(&config.effective_log_level(), &data_dir.join(paths::LOG_DIR_NAME)) {
            eprintln!("Warning: {e}");
        }
    }

    if let Err(e) = templates::init_templates(config.templates_dir.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    let store = match SqliteStore::with_path(data_dir.join(paths::DATABASE_FILENAME)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error opening storage: {e}");
            return ExitCode::from(1);
        }
    };
    let mut app = match App::load(store) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error loading data: {e}");
            return ExitCode::from(1);
        }
    };

    let confirm: &dyn Confirm = if cli.yes { &AssumeYes } else { &TerminalConfirm };
    let options = RunOptions { confirm, presenter: Presenter::local(), json: cli.json, data_dir };
    emit(run(cli.command, &mut app, &options))
}

fn emit(output: CliOutput) -> ExitCode {
    for msg in output.stdout {
        println!("{msg}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }
    output.exit_code
}
