//! Path utilities for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is reachable under `/host`, which
//! points at the cwd Zellij was started from (normally the user's home).

use std::path::PathBuf;

/// Directory holding the catalog and the trace file.
///
/// Resolves to `/host/.local/share/zellij/drivesphere`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("drivesphere")
}

/// Catalog location used when `catalog_file` is not configured.
#[must_use]
pub fn default_catalog_file() -> PathBuf {
    get_data_dir().join("catalog.json")
}

/// Maps a leading `~` onto the sandbox `/host` mount.
///
/// # Examples
///
/// ```
/// use drivesphere::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/cars.json"), "/host/cars.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Rewrites a sandbox path the way the user would type it on the host.
///
/// # Examples
///
/// ```
/// use drivesphere::infrastructure::display_path;
///
/// assert_eq!(display_path("/host/.local/share/cars.json"), "~/.local/share/cars.json");
/// assert_eq!(display_path("/etc/cars.json"), "/etc/cars.json");
/// ```
#[must_use]
pub fn display_path(path: &str) -> String {
    match path.strip_prefix("/host") {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}
