//! `dotsync` binary: parse arguments, set up logging, run one direction.
use anyhow::Result;
use clap::Parser;

use dotsync::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let direction = args.direction();
    let command = direction.to_string();

    logging::init_subscriber(args.verbose, &command);
    let log = logging::Logger::new(&command);

    commands::sync::run(&args.global, direction, &log)
}
