use std::path::{Path, PathBuf};

/// Resolve the levit project root.
///
/// Priority:
/// 1. `--root` flag / `LEVIT_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `levit.json` or `.levit/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if dir.join("levit.json").is_file() || dir.join(".levit").is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    let mut dir = cwd.clone();
    loop {
        if dir.join(".git").is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd
}

/// Commands other than `init` require an initialized project.
pub fn require_initialized(root: &Path) -> anyhow::Result<()> {
    if !root.join("levit.json").is_file() {
        anyhow::bail!("not initialized: run 'levit init'");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn require_initialized_needs_manifest() {
        let dir = TempDir::new().unwrap();
        assert!(require_initialized(dir.path()).is_err());
        std::fs::write(dir.path().join("levit.json"), "{}").unwrap();
        assert!(require_initialized(dir.path()).is_ok());
    }
}
