use std::path::Path;

use profile_state::ProfileRegistry;

use crate::error::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "list", about = "List the profiles declared in Local State")]
pub struct List {}

impl List {
    pub fn run(&self, base_dir: &Path) -> Result<(), AppError> {
        let registry = ProfileRegistry::new(base_dir);
        let profiles = registry.load_profiles()?;

        if profiles.is_empty() {
            println!("No profiles found.");
            return Ok(());
        }

        println!("Available profiles:");
        for (i, profile) in profiles.iter().enumerate() {
            println!("{}. {} ({})", i + 1, profile.name, profile.id);
        }
        Ok(())
    }
}
