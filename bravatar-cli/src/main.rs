mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;

use crate::cli::Cli;
use crate::error::AppError;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let base_dir = util::provide_base_dir(cli.base_dir.as_deref())?;
    cli.command.run(&base_dir)
}
