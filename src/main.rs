//! `bootstrap` command-line entry point.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use bootstrap_cli::cli::{Cli, Command};
use bootstrap_cli::commands;
use bootstrap_cli::exec::SystemExecutor;
use bootstrap_cli::logging::{self, Log, Logger};
use bootstrap_cli::platform::Platform;

#[allow(clippy::print_stdout)]
fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if matches!(args.command, Command::Version) {
        println!("bootstrap {}", commands::version());
        return Ok(());
    }

    logging::init_subscriber(args.verbose, args.command.name());
    let logger = Logger::new(args.command.name());
    let log_file = logger.log_path().cloned();
    let log: Arc<dyn Log> = Arc::new(logger);

    let result = match &args.command {
        Command::Install(opts) => commands::install::run(&args.global, opts, Arc::clone(&log)),
        Command::Detect => {
            commands::detect::run(log.as_ref(), &SystemExecutor, &Platform::detect()).map(|_| ())
        }
        Command::List => {
            commands::list::run(&args.global, log.as_ref(), &SystemExecutor, &Platform::detect())
        }
        Command::Version => Ok(()),
    };

    if let Some(path) = log_file {
        log.debug(&format!("log written to {}", path.display()));
    }
    result
}
