//! Kiln CLI - production front-end build configuration.
//!
//! Parses arguments, initializes logging and dispatches to a command.

use clap::Parser;
use kiln_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Config(config_args) => commands::config_execute(config_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Compress(compress_args) => commands::compress_execute(compress_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
