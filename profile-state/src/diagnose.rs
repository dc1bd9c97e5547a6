use std::fs;
use std::path::Path;

use serde_json::Value;

use data_error::Result;

use crate::registry::ProfileRegistry;
use crate::state::LocalState;
use crate::{AVATAR_FILE, AVATAR_FILE_NO_EXT, PREFERENCES_FILE};

/// Read-only snapshot of one profile's avatar-related state, for
/// the `status` front-end. Nothing in this module writes.
#[derive(Debug)]
pub struct ProfileReport {
    pub id: String,
    pub name: String,
    pub gaia_id: Option<String>,
    pub use_gaia_picture: Option<bool>,
    pub is_using_default_avatar: Option<bool>,
    pub avatar_icon: Option<String>,
    pub preferences: PreferencesReport,
    /// Byte size of `Google Profile Picture.png`, when present.
    pub png_image: Option<u64>,
    /// Byte size of the extensionless twin, when present.
    pub raw_image: Option<u64>,
}

#[derive(Debug)]
pub enum PreferencesReport {
    Missing,
    Unreadable(String),
    Flags {
        using_gaia_avatar: Option<bool>,
        using_default_avatar: Option<bool>,
    },
}

/// Report every profile's current flags and image files.
///
/// Records are read loosely (field by field, not through the typed
/// structs), so one malformed entry cannot sink the whole report.
pub fn inspect(registry: &ProfileRegistry) -> Result<Vec<ProfileReport>> {
    let state = LocalState::load(registry.local_state_path())?;

    let reports = state
        .profile
        .info_cache
        .iter()
        .map(|(id, record)| {
            let dir = registry.profile_dir(id);
            ProfileReport {
                id: id.clone(),
                name: str_field(record, "name").unwrap_or_else(|| id.clone()),
                gaia_id: str_field(record, "gaia_id"),
                use_gaia_picture: bool_field(record, "use_gaia_picture"),
                is_using_default_avatar: bool_field(
                    record,
                    "is_using_default_avatar",
                ),
                avatar_icon: str_field(record, "avatar_icon"),
                preferences: preferences_report(
                    &dir.join(PREFERENCES_FILE),
                ),
                png_image: file_size(&dir.join(AVATAR_FILE)),
                raw_image: file_size(&dir.join(AVATAR_FILE_NO_EXT)),
            }
        })
        .collect();

    Ok(reports)
}

fn str_field(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn bool_field(record: &Value, key: &str) -> Option<bool> {
    record.get(key).and_then(Value::as_bool)
}

fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|m| m.len())
}

fn preferences_report(path: &Path) -> PreferencesReport {
    if !path.exists() {
        return PreferencesReport::Missing;
    }
    let parsed: std::result::Result<Value, _> = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|raw| {
            serde_json::from_str(&raw).map_err(|e| e.to_string())
        });
    match parsed {
        Ok(doc) => {
            let profile = doc.get("profile").cloned().unwrap_or(Value::Null);
            PreferencesReport::Flags {
                using_gaia_avatar: bool_field(&profile, "using_gaia_avatar"),
                using_default_avatar: bool_field(
                    &profile,
                    "using_default_avatar",
                ),
            }
        }
        Err(e) => PreferencesReport::Unreadable(e),
    }
}
