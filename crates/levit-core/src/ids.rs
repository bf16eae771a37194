use crate::error::Result;
use crate::io;
use regex::Regex;
use std::path::Path;

/// Compute the next unused sequential id in `dir` by matching each entry
/// against `pattern` (one capture group of digits) and taking max + 1.
///
/// Returns a zero-padded string of minimum width 3 ("001", "999", "1000").
/// A missing directory yields "001". Non-matching or non-numeric entries are
/// skipped. No locking: two concurrent callers may compute the same id —
/// accepted for a single-operator tool.
pub fn next_sequential_id(dir: &Path, pattern: &Regex) -> Result<String> {
    let mut max = 0u64;
    for name in io::list_dir(dir)? {
        let Some(caps) = pattern.captures(&name) else {
            continue;
        };
        let Some(m) = caps.get(1) else {
            continue;
        };
        if let Ok(n) = m.as_str().parse::<u64>() {
            max = max.max(n);
        }
    }
    Ok(format!("{:03}", max + 1))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn feature_pattern() -> Regex {
        Regex::new(r"^(\d+)-").unwrap()
    }

    #[test]
    fn missing_directory_starts_at_001() {
        let dir = TempDir::new().unwrap();
        let id = next_sequential_id(&dir.path().join("nope"), &feature_pattern()).unwrap();
        assert_eq!(id, "001");
    }

    #[test]
    fn empty_directory_starts_at_001() {
        let dir = TempDir::new().unwrap();
        let id = next_sequential_id(dir.path(), &feature_pattern()).unwrap();
        assert_eq!(id, "001");
    }

    #[test]
    fn next_is_max_plus_one() {
        let dir = TempDir::new().unwrap();
        for name in ["003-a.md", "001-b.md", "007-c.md"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let id = next_sequential_id(dir.path(), &feature_pattern()).unwrap();
        assert_eq!(id, "008");
    }

    #[test]
    fn non_matching_entries_skipped() {
        let dir = TempDir::new().unwrap();
        for name in ["README.md", "notes.txt", "002-real.md"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let id = next_sequential_id(dir.path(), &feature_pattern()).unwrap();
        assert_eq!(id, "003");
    }

    #[test]
    fn width_is_minimum_not_truncation() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("999-last.md"), "").unwrap();
        let id = next_sequential_id(dir.path(), &feature_pattern()).unwrap();
        assert_eq!(id, "1000");
    }

    #[test]
    fn adr_pattern() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ADR-004-use-postgres.md"), "").unwrap();
        let pattern = Regex::new(r"^ADR-(\d+)-").unwrap();
        let id = next_sequential_id(dir.path(), &pattern).unwrap();
        assert_eq!(id, "005");
    }
}
