//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable pointing at the root of the software
/// checkout. Parameter files and session directories are resolved against it.
pub const SW_ROOT_ENV_VAR: &str = "NAV_SW_ROOT";

/// Get the root directory of the software.
pub fn get_nav_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}

/// Resolve a path against the software root.
///
/// Absolute paths are returned unchanged. If the root variable is not set the
/// path is returned as given, relative to the working directory.
pub fn resolve_sw_path<P: Into<PathBuf>>(path: P) -> PathBuf {
    let path = path.into();

    if path.is_absolute() {
        return path;
    }

    match get_nav_sw_root() {
        Ok(mut root) => {
            root.push(path);
            root
        }
        Err(_) => path,
    }
}
