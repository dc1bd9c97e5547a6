use std::path::{Path, PathBuf};

use profile_state::{IconApplier, PreferencesOutcome, ProfileRegistry};

use crate::error::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "apply", about = "Attach a custom image to a profile")]
pub struct Apply {
    #[clap(value_parser, help = "Profile directory name, e.g. `Profile 1`")]
    profile: String,
    #[clap(value_parser, help = "Path to the source image")]
    image: PathBuf,
}

impl Apply {
    pub fn run(&self, base_dir: &Path) -> Result<(), AppError> {
        // No lock is taken on the browser's files; a running
        // instance can overwrite the change on shutdown.
        println!("Close the browser before applying.");

        let applier = IconApplier::new(ProfileRegistry::new(base_dir));
        let report = applier.apply(&self.profile, &self.image)?;

        match &report.preferences {
            PreferencesOutcome::Updated => {
                println!(
                    "Custom icon applied to `{}` ({}).",
                    report.profile.name, report.profile.id
                );
            }
            PreferencesOutcome::Missing => {
                println!(
                    "Custom icon applied to `{}`, but no Preferences file \
                     was found to update.",
                    report.profile.id
                );
            }
            PreferencesOutcome::Failed(reason) => {
                println!(
                    "Custom icon applied to `{}`, but Preferences could \
                     not be updated: {}",
                    report.profile.id, reason
                );
            }
        }
        println!("Restart the browser to see the change.");
        Ok(())
    }
}
