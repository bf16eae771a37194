use crate::error::{LevitError, Result};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// Maximum file size accepted by `read_to_string_safe` (10 MiB).
pub const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting the manifest or artifact files.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// List entry names in a directory, sorted. A missing directory yields an
/// empty list rather than an error — scanners and the ID allocator treat
/// "no directory yet" as "no entries".
pub fn list_dir(path: &Path) -> Result<Vec<String>> {
    if !path.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Lexically resolve `path` against `base`, folding `.` and `..` without
/// touching the filesystem (the target may not exist yet).
fn resolve(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Fold `base` into an absolute lexical path. A relative base (e.g.
/// `--root .`) is anchored at the current working directory first, so the
/// containment comparison below always runs on two absolute paths.
fn absolutize(base: &Path) -> Result<PathBuf> {
    if base.is_absolute() {
        Ok(resolve(Path::new("/"), base))
    } else {
        let cwd = std::env::current_dir()?;
        Ok(resolve(Path::new("/"), &cwd.join(base)))
    }
}

/// Reject any path that resolves outside `base`.
pub fn validate_path(path: &Path, base: &Path) -> Result<()> {
    let base = absolutize(base)?;
    let resolved = resolve(&base, path);
    if resolved != base && !resolved.starts_with(&base) {
        return Err(LevitError::PathTraversal {
            path: path.display().to_string(),
            base: base.display().to_string(),
        });
    }
    Ok(())
}

/// Read a file with path-boundary and size-limit enforcement.
pub fn read_to_string_safe(path: &Path, base: &Path) -> Result<String> {
    read_to_string_limited(path, base, MAX_READ_SIZE)
}

pub fn read_to_string_limited(path: &Path, base: &Path, max_size: u64) -> Result<String> {
    validate_path(path, base)?;
    let resolved = resolve(base, path);
    if !resolved.exists() {
        return Err(LevitError::MissingFile(path.display().to_string()));
    }
    let size = std::fs::metadata(&resolved)?.len();
    if size > max_size {
        return Err(LevitError::FileTooLarge {
            path: path.display().to_string(),
            size,
            max: max_size,
        });
    }
    Ok(std::fs::read_to_string(&resolved)?)
}

/// Write a file inside `base`, refusing to clobber unless `overwrite`.
pub fn write_file_safe(path: &Path, base: &Path, content: &str, overwrite: bool) -> Result<()> {
    validate_path(path, base)?;
    let resolved = resolve(base, path);
    if resolved.exists() && !overwrite {
        return Err(LevitError::FileExists(path.display().to_string()));
    }
    atomic_write(&resolved, content.as_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
