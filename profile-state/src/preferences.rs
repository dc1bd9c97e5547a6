use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use data_error::Result;

/// Per-profile `Preferences` document. Same load-patch-save
/// lifecycle as `Local State`, scoped to one profile directory.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfileSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_gaia_avatar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_default_avatar: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Preferences {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Set the avatar flags, creating the `profile` object when the
    /// document lacks one.
    pub fn mark_custom_avatar(&mut self) {
        let profile = self.profile.get_or_insert_with(Default::default);
        profile.using_gaia_avatar = Some(true);
        profile.using_default_avatar = Some(false);
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
