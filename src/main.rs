use labelwrap::config::{load_config, CliArgs};
use labelwrap::errors::{AppError, AppResult};
use labelwrap::logging;
use labelwrap::sink::{print_message, WriterSink};

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();
    logging::init_tracing(args.verbose);

    run(&args)?;
    Ok(())
}

fn run(args: &CliArgs) -> AppResult<()> {
    // Load configuration
    let config = load_config(args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(());
    }

    let message = read_input(config.filename.as_deref())?;

    let stdout = io::stdout();
    let mut sink = WriterSink::new(stdout.lock());
    let printed = print_message(&mut sink, &message, &config.wrap_options())?;
    tracing::debug!(lines = printed, device = %config.device, "message printed");

    Ok(())
}

fn read_input(path: Option<&Path>) -> AppResult<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| AppError::Input {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(AppError::Stdin)?;
            Ok(buffer)
        }
    }
}
