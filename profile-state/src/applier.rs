use std::fs;
use std::path::Path;

use data_error::{AvatarError, Result};
use log::{info, warn};

use crate::preferences::Preferences;
use crate::registry::{ProfileMeta, ProfileRegistry};
use crate::state::LocalState;
use crate::{AVATAR_FILE, AVATAR_FILE_NO_EXT, PREFERENCES_FILE};

/// Applies a custom avatar image to one profile.
///
/// The update touches three kinds of files, strictly in this order:
/// the two image files, the global `Local State` document, and the
/// per-profile `Preferences` document. There is no transaction
/// across them; each write is individually atomic with a `.bak`
/// sibling (see `fs_atomic`), and a failure leaves the earlier
/// writes in place. The `Preferences` step alone is downgraded to a
/// warning on failure, since by then the icon change has already
/// taken effect.
pub struct IconApplier {
    registry: ProfileRegistry,
}

/// What happened to the `Preferences` step of an apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferencesOutcome {
    Updated,
    /// No `Preferences` file in the profile directory.
    Missing,
    /// The file exists but could not be read or rewritten.
    Failed(String),
}

/// Outcome of a successful [`IconApplier::apply`]. The images and
/// `Local State` are guaranteed updated; `preferences` records
/// whether the run was a full or a partial success.
#[derive(Debug)]
pub struct ApplyReport {
    pub profile: ProfileMeta,
    pub preferences: PreferencesOutcome,
}

impl ApplyReport {
    pub fn fully_applied(&self) -> bool {
        self.preferences == PreferencesOutcome::Updated
    }
}

impl IconApplier {
    pub fn new(registry: ProfileRegistry) -> Self {
        Self { registry }
    }

    /// Normalize `image` and attach it to profile `id`.
    ///
    /// Fails with `ProfileNotFound` before touching anything when
    /// `id` is not in the current profile table.
    pub fn apply(
        &self,
        id: &str,
        image: impl AsRef<Path>,
    ) -> Result<ApplyReport> {
        let profile = self
            .registry
            .load_profiles()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AvatarError::ProfileNotFound(id.to_owned()))?;

        fs::create_dir_all(&profile.path)?;

        let png = data_image::normalize(image)?;

        // The browser probes both names, give them identical bytes.
        fs_atomic::write_atomic(profile.path.join(AVATAR_FILE), &png)?;
        fs_atomic::write_atomic(profile.path.join(AVATAR_FILE_NO_EXT), &png)?;
        info!(
            "avatar image written to {}",
            profile.path.join(AVATAR_FILE).display()
        );

        self.update_local_state(id)?;

        let preferences = self.update_preferences(&profile.path);

        Ok(ApplyReport {
            profile,
            preferences,
        })
    }

    /// Patch the profile's record in `Local State`. The document is
    /// re-read here rather than reusing the discovery snapshot, so
    /// changes made in between are not clobbered.
    fn update_local_state(&self, id: &str) -> Result<()> {
        let path = self.registry.local_state_path();
        let mut state = LocalState::load(&path)?;

        let mut record = state
            .profile_info(id)?
            .ok_or_else(|| AvatarError::ProfileEntryMissing(id.to_owned()))?;
        record.mark_custom_avatar();
        state.set_profile_info(id, &record)?;

        fs_atomic::write_atomic(&path, &state.to_bytes()?)?;
        info!("Local State updated for profile `{id}`");
        Ok(())
    }

    /// Best-effort `Preferences` patch. A missing or unwritable
    /// file is a warning, not a failure: the state file and images
    /// are already in place.
    fn update_preferences(&self, profile_dir: &Path) -> PreferencesOutcome {
        let path = profile_dir.join(PREFERENCES_FILE);
        if !path.exists() {
            warn!("no Preferences file at {}, skipping", path.display());
            return PreferencesOutcome::Missing;
        }
        match patch_preferences(&path) {
            Ok(()) => {
                info!("Preferences updated at {}", path.display());
                PreferencesOutcome::Updated
            }
            Err(e) => {
                warn!("could not update {}: {}", path.display(), e);
                PreferencesOutcome::Failed(e.to_string())
            }
        }
    }
}

fn patch_preferences(path: &Path) -> Result<()> {
    let mut prefs = Preferences::load(path)?;
    prefs.mark_custom_avatar();
    fs_atomic::write_atomic(path, &prefs.to_bytes()?)
}
