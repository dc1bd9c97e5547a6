use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use data_error::{AvatarError, Result};

use crate::{AVATAR_FILE, GAIA_ID_PLACEHOLDER, GENERIC_AVATAR_ICON};

/// The browser's global `Local State` document.
///
/// Only the profile table is typed; every other key round-trips
/// through `extra` untouched, so a load-patch-save cycle never
/// drops unrelated configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LocalState {
    #[serde(default)]
    pub profile: ProfileTable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `profile` section of `Local State`, holding the table of
/// all known profiles keyed by directory name.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfileTable {
    #[serde(default)]
    pub info_cache: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One `info_cache` entry. Fields this tool touches are explicit,
/// the rest ride along in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaia_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_gaia_picture: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_using_default_avatar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaia_picture_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileInfo {
    /// Flip the record into the "account avatar backed by a local
    /// file" shape. An existing non-empty `gaia_id` is left
    /// untouched, whatever its shape.
    pub fn mark_custom_avatar(&mut self) {
        self.use_gaia_picture = Some(true);
        self.is_using_default_avatar = Some(false);
        if self.gaia_id.as_deref().unwrap_or("").is_empty() {
            self.gaia_id = Some(GAIA_ID_PLACEHOLDER.to_owned());
        }
        self.gaia_picture_file_name = Some(AVATAR_FILE.to_owned());
        self.avatar_icon = Some(GENERIC_AVATAR_ICON.to_owned());
    }
}

impl LocalState {
    /// Read and parse the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AvatarError::StateFileMissing(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(AvatarError::StateFileCorrupt)
    }

    /// Typed view of one profile record, if present.
    pub fn profile_info(&self, id: &str) -> Result<Option<ProfileInfo>> {
        match self.profile.info_cache.get(id) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(AvatarError::StateFileCorrupt),
            None => Ok(None),
        }
    }

    /// Store `info` back into the table. Replacing an existing key
    /// keeps its stored position.
    pub fn set_profile_info(
        &mut self,
        id: &str,
        info: &ProfileInfo,
    ) -> Result<()> {
        let value = serde_json::to_value(info)?;
        self.profile.info_cache.insert(id.to_owned(), value);
        Ok(())
    }

    /// Serialize the whole document, two-space indented as the
    /// browser writes it.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    const DOC: &str = r#"{
        "browser": {"first_run_finished": true},
        "profile": {
            "info_cache": {
                "Default": {"name": "Personal", "gaia_id": "", "avatar_index": 26},
                "Profile 1": {}
            },
            "last_used": "Default"
        }
    }"#;

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new("state").unwrap();
        let err = LocalState::load(dir.path().join("Local State")).unwrap_err();
        assert!(matches!(err, AvatarError::StateFileMissing(_)));
    }

    #[test]
    fn load_corrupt_file() {
        let dir = TempDir::new("state").unwrap();
        let path = dir.path().join("Local State");
        fs::write(&path, "{ not json").unwrap();

        let err = LocalState::load(&path).unwrap_err();
        assert!(matches!(err, AvatarError::StateFileCorrupt(_)));
    }

    #[test]
    fn patch_preserves_unrelated_keys_and_order() {
        let mut state: LocalState = serde_json::from_str(DOC).unwrap();

        let mut info = state.profile_info("Default").unwrap().unwrap();
        info.mark_custom_avatar();
        state.set_profile_info("Default", &info).unwrap();

        let out: Value =
            serde_json::from_slice(&state.to_bytes().unwrap()).unwrap();
        assert_eq!(out["browser"]["first_run_finished"], Value::Bool(true));
        assert_eq!(out["profile"]["last_used"], "Default");
        assert_eq!(
            out["profile"]["info_cache"]["Default"]["avatar_index"],
            26
        );

        let keys: Vec<_> = out["profile"]["info_cache"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, ["Default", "Profile 1"]);
    }

    #[test]
    fn empty_gaia_id_gets_the_placeholder() {
        let mut info = ProfileInfo {
            gaia_id: Some(String::new()),
            ..Default::default()
        };
        info.mark_custom_avatar();
        assert_eq!(info.gaia_id.as_deref(), Some(GAIA_ID_PLACEHOLDER));
        assert_eq!(info.use_gaia_picture, Some(true));
        assert_eq!(info.is_using_default_avatar, Some(false));
        assert_eq!(info.gaia_picture_file_name.as_deref(), Some(AVATAR_FILE));
        assert_eq!(info.avatar_icon.as_deref(), Some(GENERIC_AVATAR_ICON));
    }

    #[test]
    fn real_gaia_id_is_left_untouched() {
        let mut info = ProfileInfo {
            gaia_id: Some("110194087556754".to_owned()),
            ..Default::default()
        };
        info.mark_custom_avatar();
        assert_eq!(info.gaia_id.as_deref(), Some("110194087556754"));
    }
}
