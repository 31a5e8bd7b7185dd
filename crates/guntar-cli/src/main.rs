//! Guntar CLI - list, extract and browse tar archives from the terminal.

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli, formatter: &dyn output::OutputFormatter) -> Result<()> {
    match &cli.command {
        cli::Commands::Explore(args) => logging::init_file(cli.verbose, args.log_file.as_deref())?,
        _ => logging::init(cli.verbose)?,
    }

    let config = config::Config::load(cli.config.as_deref())?;

    match &cli.command {
        cli::Commands::List(args) => commands::list::execute(args, formatter),
        cli::Commands::Extract(args) => {
            let show_progress = !cli.quiet && !cli.json;
            commands::extract::execute(args, &config, formatter, show_progress)
        }
        cli::Commands::Explore(args) => commands::explore::execute(args, &config, formatter),
    }
}
