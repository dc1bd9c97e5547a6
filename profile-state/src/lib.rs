//! On-disk state of a Chromium-derived browser's profiles, and the
//! operations this tool performs on it: enumerate the profiles
//! declared in `Local State`, and attach a custom image to one of
//! them as its avatar.
//!
//! All state lives in externally-owned JSON documents. Every
//! mutating operation re-reads its document immediately before
//! patching it and writes the whole document back through
//! [`fs_atomic::write_atomic`]; no in-process copy survives between
//! operations.

pub mod applier;
pub mod diagnose;
pub mod preferences;
pub mod registry;
pub mod state;

pub use applier::{ApplyReport, IconApplier, PreferencesOutcome};
pub use diagnose::{inspect, PreferencesReport, ProfileReport};
pub use preferences::Preferences;
pub use registry::{ProfileMeta, ProfileRegistry};
pub use state::{LocalState, ProfileInfo};

/// The browser's global state document, relative to the base
/// installation directory.
pub const LOCAL_STATE_FILE: &str = "Local State";

/// Per-profile preferences document, relative to a profile
/// directory.
pub const PREFERENCES_FILE: &str = "Preferences";

/// Avatar image filename the browser probes for.
pub const AVATAR_FILE: &str = "Google Profile Picture.png";

/// Extensionless twin of [`AVATAR_FILE`]; some browser builds probe
/// this name instead, so both get identical bytes.
pub const AVATAR_FILE_NO_EXT: &str = "Google Profile Picture";

/// Synthetic 21-digit account id. Injected only when a profile has
/// no gaia id at all, so the browser treats the local picture file
/// as an account avatar.
pub const GAIA_ID_PLACEHOLDER: &str = "999999999999999999999";

/// Generic stock avatar the record is reset to, so nothing else
/// shadows the picture file.
pub const GENERIC_AVATAR_ICON: &str = "chrome://theme/IDR_PROFILE_AVATAR_56";
