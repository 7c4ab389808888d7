//! Data directory resolution.

use std::path::PathBuf;

const ZELLIJ_DATA_ROOT: &str = "/host/.local/share/zellij";

/// Directory holding the plugin's trace file.
///
/// `/host` maps to the directory Zellij was started from, so this usually
/// resolves to `~/.local/share/zellij/paperlens` on the host.
///
/// ```
/// use paperlens::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/paperlens")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(ZELLIJ_DATA_ROOT).join("paperlens")
}
