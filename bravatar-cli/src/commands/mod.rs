use std::path::Path;

use clap::Subcommand;

use crate::error::AppError;

mod apply;
mod list;
mod status;

#[derive(Debug, Subcommand)]
pub enum Commands {
    List(list::List),
    Apply(apply::Apply),
    Status(status::Status),
}

impl Commands {
    pub fn run(&self, base_dir: &Path) -> Result<(), AppError> {
        match self {
            Commands::List(list) => list.run(base_dir),
            Commands::Apply(apply) => apply.run(base_dir),
            Commands::Status(status) => status.run(base_dir),
        }
    }
}
