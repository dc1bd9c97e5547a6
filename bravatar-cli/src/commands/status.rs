use std::path::Path;

use profile_state::{inspect, PreferencesReport, ProfileRegistry};

use crate::error::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(
    name = "status",
    about = "Report current avatar flags and image files, read-only"
)]
pub struct Status {}

impl Status {
    pub fn run(&self, base_dir: &Path) -> Result<(), AppError> {
        let registry = ProfileRegistry::new(base_dir);
        let reports = inspect(&registry)?;

        println!("Base directory: {}", base_dir.display());
        println!("Found {} profile(s) in Local State", reports.len());

        for report in reports {
            println!("\n--- {} ({}) ---", report.name, report.id);
            println!("  gaia_id: {}", fmt_opt(&report.gaia_id));
            println!(
                "  use_gaia_picture: {}",
                fmt_opt(&report.use_gaia_picture)
            );
            println!(
                "  is_using_default_avatar: {}",
                fmt_opt(&report.is_using_default_avatar)
            );
            println!("  avatar_icon: {}", fmt_opt(&report.avatar_icon));

            match &report.preferences {
                PreferencesReport::Missing => {
                    println!("  [Preferences] file not found");
                }
                PreferencesReport::Unreadable(e) => {
                    println!("  [Preferences] unreadable: {e}");
                }
                PreferencesReport::Flags {
                    using_gaia_avatar,
                    using_default_avatar,
                } => {
                    println!(
                        "  [Preferences] using_gaia_avatar: {}",
                        fmt_opt(using_gaia_avatar)
                    );
                    println!(
                        "  [Preferences] using_default_avatar: {}",
                        fmt_opt(using_default_avatar)
                    );
                }
            }

            println!("  [File] .png: {}", fmt_size(report.png_image));
            println!("  [File] no-ext: {}", fmt_size(report.raw_image));
        }
        Ok(())
    }
}

fn fmt_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "unset".to_owned(),
    }
}

fn fmt_size(size: Option<u64>) -> String {
    match size {
        Some(bytes) => format!("{bytes} bytes"),
        None => "absent".to_owned(),
    }
}
