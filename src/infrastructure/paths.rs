//! Platform path helpers.

use std::path::PathBuf;

/// Directory for the trace file and other local state.
///
/// Resolves to the platform data directory plus `healthdesk`, e.g.
/// `~/.local/share/healthdesk` on Linux. Falls back to `./healthdesk` when the
/// platform has no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("healthdesk")
}

/// Replaces a leading `~` with the user's home directory.
///
/// Paths without a tilde, and every path when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use healthdesk::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/srv/seed.json"), PathBuf::from("/srv/seed.json"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix_only() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/seed.json"), home.join("seed.json"));
        assert_eq!(expand_tilde("data/~/x"), PathBuf::from("data/~/x"));
    }

    #[test]
    fn data_dir_is_named_after_the_crate() {
        assert!(default_data_dir().ends_with("healthdesk"));
    }
}
