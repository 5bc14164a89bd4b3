//! Path resolution: home directory, tilde expansion, platform path selection.
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crate::platform::Platform;

/// The user's home directory could not be determined.
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's home directory")]
pub struct NoHome;

/// Absolute path to the user's home directory.
///
/// Does not check that the directory exists.
///
/// # Errors
///
/// Returns [`NoHome`] when neither `HOME` nor the platform fallback is set.
pub fn home_dir() -> Result<PathBuf, NoHome> {
    dirs::home_dir().ok_or(NoHome)
}

/// Replace the first `~` in `path` with `home`.
///
/// Everything after the `~` is kept verbatim; anything before it is dropped,
/// so `"~/dev"` and `"x~/dev"` both become `"<home>/dev"`. Paths without a
/// tilde are returned unchanged.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use dotsync::paths::expand_tilde;
///
/// let home = Path::new("/home/me");
/// assert_eq!(expand_tilde("~/.vimrc", home), "/home/me/.vimrc");
/// assert_eq!(expand_tilde("/etc/hosts", home), "/etc/hosts");
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: &Path) -> String {
    path.split_once('~').map_or_else(
        || path.to_string(),
        |(_, rest)| format!("{}{rest}", home.display()),
    )
}

/// Pick the installed path for `platform`.
///
/// Uses the entry at [`Platform::index`]; when the list is shorter (a single
/// shared path, or an unknown platform) the last path is the fallback.
/// Returns `None` only for an empty list.
#[must_use]
pub fn select_installed_path(paths: &[PathBuf], platform: Platform) -> Option<&Path> {
    paths
        .get(platform.index())
        .or_else(|| paths.last())
        .map(PathBuf::as_path)
}

/// Render a mirror source path.
///
/// Directory sources end in a separator so rsync copies the directory's
/// contents into the destination instead of nesting it.
#[must_use]
pub fn rsync_source(path: &Path, is_directory: bool) -> String {
    let mut s = path.display().to_string();
    if is_directory && !s.ends_with(MAIN_SEPARATOR) {
        s.push(MAIN_SEPARATOR);
    }
    s
}
