// Storage path utilities.
// Resolves the platform state directory and file names for stored blobs.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base state directory (~/.local/share/slidetab on Linux).
pub fn state_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "slidetab").map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Path of the file holding the blob stored under `key`.
pub fn blob_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_name(key)))
}

/// Path of the log file inside a state directory.
pub fn log_path(dir: &Path) -> PathBuf {
    dir.join("slidetab.log")
}

/// Sanitize a storage key for use as a file name.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("tab-storage"), "tab-storage");
        assert_eq!(sanitize_name("with/slash"), "with_slash");
        assert_eq!(sanitize_name("scope:key"), "scope_key");
    }

    #[test]
    fn test_blob_and_log_paths() {
        let dir = Path::new("/var/lib/slidetab");
        assert!(blob_path(dir, "tab-storage").ends_with("slidetab/tab-storage.json"));
        assert!(blob_path(dir, "a/b").ends_with("slidetab/a_b.json"));
        assert!(log_path(dir).ends_with("slidetab/slidetab.log"));
    }
}
