use std::path::{Path, PathBuf};

use serde_json::Value;

use data_error::Result;

use crate::state::LocalState;
use crate::LOCAL_STATE_FILE;

/// Read-only view over the profiles declared in `Local State`.
///
/// Discovery never mutates anything; it re-reads the state file on
/// every call instead of caching, so the caller always sees the
/// current table.
pub struct ProfileRegistry {
    base_dir: PathBuf,
}

/// One discovered profile. Derived from `Local State` plus the base
/// installation path; never persisted.
#[derive(Debug, Clone)]
pub struct ProfileMeta {
    /// Profile directory name, the unique key in `info_cache`.
    pub id: String,
    /// Display name; falls back to the directory name when the
    /// record has none.
    pub name: String,
    /// Absolute profile directory path.
    pub path: PathBuf,
}

impl ProfileRegistry {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn local_state_path(&self) -> PathBuf {
        self.base_dir.join(LOCAL_STATE_FILE)
    }

    pub fn profile_dir(&self, id: &str) -> PathBuf {
        self.base_dir.join(id)
    }

    /// Enumerate profiles in the order `Local State` stores them.
    /// The order is stable for display purposes only.
    pub fn load_profiles(&self) -> Result<Vec<ProfileMeta>> {
        let state = LocalState::load(self.local_state_path())?;

        let profiles = state
            .profile
            .info_cache
            .iter()
            .map(|(id, record)| ProfileMeta {
                id: id.clone(),
                name: record
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or(id)
                    .to_owned(),
                path: self.profile_dir(id),
            })
            .collect();

        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_error::AvatarError;
    use std::fs;
    use tempdir::TempDir;

    fn write_state(dir: &TempDir, doc: &str) {
        fs::write(dir.path().join(LOCAL_STATE_FILE), doc).unwrap();
    }

    #[test]
    fn profiles_come_back_in_stored_order() {
        let dir = TempDir::new("registry").unwrap();
        write_state(
            &dir,
            r#"{"profile": {"info_cache": {
                "Profile 2": {"name": "Work"},
                "Default": {"name": "Personal"},
                "Profile 7": {}
            }}}"#,
        );

        let registry = ProfileRegistry::new(dir.path());
        let profiles = registry.load_profiles().unwrap();

        let ids: Vec<_> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["Profile 2", "Default", "Profile 7"]);
        assert_eq!(profiles[0].name, "Work");
        // no display name: the directory key doubles as the name
        assert_eq!(profiles[2].name, "Profile 7");
        assert_eq!(profiles[1].path, dir.path().join("Default"));
    }

    #[test]
    fn missing_state_file_aborts_discovery() {
        let dir = TempDir::new("registry").unwrap();
        let registry = ProfileRegistry::new(dir.path());

        let err = registry.load_profiles().unwrap_err();
        assert!(matches!(err, AvatarError::StateFileMissing(_)));
    }

    #[test]
    fn no_info_cache_means_no_profiles() {
        let dir = TempDir::new("registry").unwrap();
        write_state(&dir, r#"{"browser": {}}"#);

        let registry = ProfileRegistry::new(dir.path());
        assert!(registry.load_profiles().unwrap().is_empty());
    }
}
