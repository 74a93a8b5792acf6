mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use lenv_backend::LenvError;
use lenv_platform::LenvPaths;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let paths = LenvPaths::from_env();
    logging::init_logging(cli.verbose, paths.as_ref().ok().map(LenvPaths::log_file));

    let result = paths
        .map_err(|e| LenvError::config_unavailable(e.to_string()))
        .and_then(|paths| run(cli, &paths));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if !error.is_fatal() => {
            println!("{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("{error:?}");
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, paths: &LenvPaths) -> Result<(), LenvError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(commands::run(cli.command, paths))
}
