use crate::issue::{IssueCode, ValidationIssue};
use crate::manifest::Constraints;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Directories never descended into: dependency and build output trees.
const EXCLUDED_DIRS: &[&str] = &["node_modules", "target", "dist", "build"];

/// Extensions treated as text for forbidden-pattern scanning.
const TEXT_EXTENSIONS: &[&str] = &[
    "md", "txt", "json", "yaml", "yml", "toml", "js", "jsx", "ts", "tsx", "rs", "py", "sh", "env",
];

/// Apply the manifest's constraints to the project tree: size limits,
/// forbidden content patterns, and the dependency allow-list.
///
/// Each check is independent and tolerant of individual file failures — an
/// unreadable file is skipped with a debug log, never aborting the pass.
pub fn enforce(root: &Path, constraints: &Constraints) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let patterns = compile_patterns(&constraints.forbidden_patterns);
    let mut files = Vec::new();
    collect_files(root, root, &mut files);
    files.sort();

    for rel in &files {
        let abs = root.join(rel);
        let size = match std::fs::metadata(&abs) {
            Ok(m) => m.len(),
            Err(e) => {
                tracing::debug!(file = %rel.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if let Some(max) = constraints.max_file_size {
            if size > max {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::FileTooLarge,
                        format!("File {} exceeds max size ({size} > {max} bytes)", rel.display()),
                    )
                    .with_file(rel.display().to_string())
                    .with_details(serde_json::json!({ "actualSize": size, "maxSize": max })),
                );
            }
        }

        if !patterns.is_empty() && is_text_file(rel) && size <= crate::io::MAX_READ_SIZE {
            let content = match std::fs::read_to_string(&abs) {
                Ok(c) => c,
                Err(e) => {
                    tracing::debug!(file = %rel.display(), error = %e, "skipping non-text file");
                    continue;
                }
            };
            // One report per file: stop at the first matching pattern.
            for (raw, re) in &patterns {
                if re.is_match(&content) {
                    issues.push(
                        ValidationIssue::error(
                            IssueCode::ForbiddenPattern,
                            format!("Forbidden pattern '{raw}' found in {}", rel.display()),
                        )
                        .with_file(rel.display().to_string()),
                    );
                    break;
                }
            }
        }
    }

    issues.extend(check_allowed_dependencies(root, constraints));
    issues
}

/// Compile each configured pattern as a regex; an invalid regex falls back
/// to literal substring matching by escaping all metacharacters.
fn compile_patterns(patterns: &[String]) -> Vec<(String, Regex)> {
    patterns
        .iter()
        .filter_map(|p| {
            let re = match Regex::new(p) {
                Ok(re) => re,
                Err(_) => Regex::new(&regex::escape(p)).ok()?,
            };
            Some((p.clone(), re))
        })
        .collect()
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Recursively collect project-relative file paths, skipping dot-directories
/// other than `.levit` and excluded dependency/build trees. Files under a
/// skipped directory are never inspected.
fn collect_files(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        if is_dir {
            if name.starts_with('.') && name != crate::paths::LEVIT_DIR {
                continue;
            }
            if EXCLUDED_DIRS.contains(&name.as_str()) {
                continue;
            }
            collect_files(root, &path, out);
        } else if let Ok(rel) = path.strip_prefix(root) {
            out.push(rel.to_path_buf());
        }
    }
}

/// Flag package-manifest dependencies absent from the allow-list. Only runs
/// when an allow-list is actually declared.
fn check_allowed_dependencies(root: &Path, constraints: &Constraints) -> Vec<ValidationIssue> {
    if constraints.allowed_dependencies.is_empty() {
        return Vec::new();
    }
    let pkg_path = root.join("package.json");
    if !pkg_path.exists() {
        return Vec::new();
    }

    let pkg: serde_json::Value = match std::fs::read_to_string(&pkg_path)
        .map_err(|e| e.to_string())
        .and_then(|c| serde_json::from_str(&c).map_err(|e| e.to_string()))
    {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "skipping unparsable package.json");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = Vec::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(map) = pkg.get(section).and_then(|v| v.as_object()) {
            names.extend(map.keys().cloned());
        }
    }
    names.sort();
    names.dedup();

    names
        .into_iter()
        .filter(|n| !constraints.allowed_dependencies.contains(n))
        .map(|n| {
            ValidationIssue::error(
                IssueCode::DisallowedDependency,
                format!("Dependency '{n}' is not in the allowed dependencies list"),
            )
            .with_file("package.json")
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
