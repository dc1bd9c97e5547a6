use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "bravatar-cli")]
#[clap(about = "Attach custom avatar images to Brave profiles", long_about = None)]
pub struct Cli {
    /// Browser installation directory; defaults to the standard
    /// Brave location under the home directory
    #[clap(long, value_parser, global = true)]
    pub base_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
