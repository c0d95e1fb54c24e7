//! Reference export loader.
//!
//! A reference export is a tab-delimited file whose first column lists the
//! host names matching one status condition. Only membership matters, so
//! the file reduces to a set of trimmed keys.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use invtag_shared::{InvtagError, Result};

use crate::table::DELIMITER;

/// Load the key set from a reference export.
///
/// The header row is skipped. Every remaining row contributes its trimmed
/// first field; blank lines and rows with a whitespace-only key are
/// dropped, and duplicate keys collapse. Fails with
/// [`InvtagError::NotFound`] if the path does not exist.
pub fn load_reference_set(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Err(InvtagError::not_found(path));
    }

    let content = std::fs::read_to_string(path).map_err(|e| InvtagError::io(path, e))?;

    let mut keys = HashSet::new();
    for line in content.lines().skip(1) {
        let key = line.split(DELIMITER).next().unwrap_or("").trim();
        if !key.is_empty() {
            keys.insert(key.to_string());
        }
    }

    debug!(path = %path.display(), keys = keys.len(), "reference set loaded");
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("invtag-reference-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_trimmed_first_column_keys() {
        let dir = temp_dir();
        let path = dir.join("export.tsv");
        std::fs::write(&path, "Computer Name\tLast Seen\nhost-a\t2024-01-01\n  host-b \t\n").unwrap();

        let keys = load_reference_set(&path).unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("host-a"));
        assert!(keys.contains("host-b"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn skips_blank_lines_and_empty_keys() {
        let dir = temp_dir();
        let path = dir.join("export.tsv");
        std::fs::write(&path, "Computer Name\n\nhost-a\n   \t\n").unwrap();

        let keys = load_reference_set(&path).unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("host-a"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn duplicate_keys_collapse() {
        let dir = temp_dir();
        let path = dir.join("export.tsv");
        std::fs::write(&path, "Computer Name\nhost-a\nhost-a\nhost-a\n").unwrap();

        let keys = load_reference_set(&path).unwrap();
        assert_eq!(keys.len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn header_only_file_yields_empty_set() {
        let dir = temp_dir();
        let path = dir.join("export.tsv");
        std::fs::write(&path, "Computer Name\tLast Seen\n").unwrap();

        let keys = load_reference_set(&path).unwrap();
        assert!(keys.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_fails_with_not_found() {
        let dir = temp_dir();
        let err = load_reference_set(&dir.join("absent.tsv")).unwrap_err();
        assert!(matches!(err, InvtagError::NotFound { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn loads_reference_fixture() {
        let keys =
            load_reference_set(Path::new("../../../fixtures/references/not-reporting.tsv")).unwrap();
        assert!(keys.contains("lnx-db-07"));
        assert!(!keys.contains("Computer Name"));
    }
}
