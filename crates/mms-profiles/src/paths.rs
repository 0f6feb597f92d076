//! Profile directory resolution.

use std::path::PathBuf;

/// Environment variable naming a directory of extra profile definitions.
pub const PROFILES_DIR_ENV_VAR: &str = "MMS_PROFILES_DIR";

/// Directory of extra profiles from `MMS_PROFILES_DIR`, if set and non-empty.
pub fn profiles_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(PROFILES_DIR_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
