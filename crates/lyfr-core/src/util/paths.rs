//! Path expansion and default platform locations.

use std::path::PathBuf;

/// Expand a leading `~` in a path string.
///
/// # Examples
///
/// ```
/// use lyfr_core::util::paths::expand_tilde;
///
/// let p = expand_tilde("/var/lib/lyfr");
/// assert_eq!(p, std::path::PathBuf::from("/var/lib/lyfr"));
/// ```
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Default location of the persisted reading-progress file.
///
/// `<platform data dir>/lyfr/progress.json`; `None` when the platform
/// reports no data directory.
pub fn default_progress_file() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("lyfr").join("progress.json"))
}

/// Default root directory for the offline shell cache.
///
/// `<platform cache dir>/lyfr/shell`; `None` when the platform reports no
/// cache directory.
pub fn default_shell_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("lyfr").join("shell"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_passthrough() {
        assert_eq!(expand_tilde("/tmp/book"), PathBuf::from("/tmp/book"));
    }

    #[test]
    fn test_expand_tilde_home() {
        let expanded = expand_tilde("~/books");
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_default_locations_are_namespaced() {
        if let Some(p) = default_progress_file() {
            assert!(p.ends_with("lyfr/progress.json"));
        }
        if let Some(p) = default_shell_cache_dir() {
            assert!(p.ends_with("lyfr/shell"));
        }
    }
}
