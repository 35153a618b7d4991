//! `bootstrap` binary entry point.
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotfiles_bootstrap::cli::Cli;
use dotfiles_bootstrap::commands;
use dotfiles_bootstrap::error::BootstrapError;
use dotfiles_bootstrap::logging::{self, Log as _, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let cli = Cli::parse();

    if cli.list {
        commands::list::run();
        return ExitCode::SUCCESS;
    }

    logging::init_subscriber(cli.verbose, "bootstrap");
    let log = Arc::new(Logger::new("bootstrap"));

    match commands::bootstrap::run(&cli, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            let code = e
                .downcast_ref::<BootstrapError>()
                .map_or(1, BootstrapError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
