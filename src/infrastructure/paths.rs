//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Trace output file name inside [`get_data_dir`].
pub const TRACE_FILE_NAME: &str = "listboard-otlp.json";

/// Directory for Listboard's trace output.
///
/// `/host` points at the cwd of the last focused terminal, usually the home
/// directory, so this resolves to `~/.local/share/zellij/listboard`.
///
/// # Examples
///
/// ```
/// use listboard::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/listboard"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("listboard")
}

#[must_use]
pub fn trace_file_path() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Maps `~` and `~/...` onto the sandbox's `/host` mount.
///
/// Used for the `theme_file` option, which users write as a home-relative path.
///
/// # Examples
///
/// ```
/// use listboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
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
