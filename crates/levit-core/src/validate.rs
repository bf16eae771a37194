use crate::constraints;
use crate::frontmatter::{normalize_depends_on, parse_frontmatter};
use crate::graph::DependencyGraph;
use crate::io;
use crate::issue::{IssueCode, ValidationIssue, ValidationResult};
use crate::manifest::Manifest;
use crate::paths;
use crate::types::ArtifactKind;
use regex::Regex;
use serde_yaml::Mapping;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

static FEATURE_ID_RE: OnceLock<Regex> = OnceLock::new();
static DECISION_ID_RE: OnceLock<Regex> = OnceLock::new();

fn feature_id_re() -> &'static Regex {
    FEATURE_ID_RE.get_or_init(|| Regex::new(r"^(\d+)-").unwrap())
}

fn decision_id_re() -> &'static Regex {
    DECISION_ID_RE.get_or_init(|| Regex::new(r"^ADR-(\d+)-").unwrap())
}

/// Feature metadata gathered during the scan step and reused for the
/// dependency steps, so each artifact file is read once per run.
struct ScannedFeature {
    id: String,
    depends_on: Vec<String>,
    file: String,
}

/// Run the full validation pass over a project tree.
///
/// Every step runs regardless of earlier findings; all issues are collected
/// into one result. Per-file read/parse failures degrade to issues — a
/// single malformed artifact never aborts the run.
pub fn validate(root: &Path) -> crate::error::Result<ValidationResult> {
    let manifest = Manifest::read(root)?;
    let mut issues = Vec::new();
    let mut files_scanned = 0usize;

    // 1. Core file presence
    for file in paths::CORE_FILES {
        if !root.join(file).exists() {
            issues.push(
                ValidationIssue::error(
                    IssueCode::MissingFile,
                    format!("Missing core file: {file}"),
                )
                .with_file(*file),
            );
        }
    }

    // 2. Core directory presence
    for dir in paths::CORE_DIRS {
        if !root.join(dir).is_dir() {
            issues.push(
                ValidationIssue::error(
                    IssueCode::MissingDirectory,
                    format!("Missing directory: {dir}"),
                )
                .with_file(*dir),
            );
        }
    }

    // 3. Per-artifact-type frontmatter and structure checks
    let mut features = Vec::new();
    let mut decision_ids = BTreeSet::new();
    for kind in ArtifactKind::all() {
        scan_kind(
            root,
            *kind,
            &mut issues,
            &mut files_scanned,
            &mut features,
            &mut decision_ids,
        )?;
    }

    // 4. Dependency existence and cycle detection
    check_dependencies(&features, &decision_ids, &mut issues);

    // 5. Constraint enforcement
    issues.extend(constraints::enforce(root, &manifest.constraints));

    Ok(ValidationResult::from_issues(issues, files_scanned))
}

fn scan_kind(
    root: &Path,
    kind: ArtifactKind,
    issues: &mut Vec<ValidationIssue>,
    files_scanned: &mut usize,
    features: &mut Vec<ScannedFeature>,
    decision_ids: &mut BTreeSet<String>,
) -> crate::error::Result<()> {
    let dir = root.join(kind.dir());
    if !dir.is_dir() {
        // Already reported as MissingDirectory in step 2.
        return Ok(());
    }

    let files: Vec<String> = io::list_dir(&dir)?
        .into_iter()
        .filter(|f| f.ends_with(".md") && f != "README.md")
        .collect();

    if kind == ArtifactKind::Feature && files.is_empty() {
        // An otherwise-empty project is still valid.
        issues.push(
            ValidationIssue::warning(
                IssueCode::NoFeatures,
                format!("No features found in {}/", kind.dir()),
            )
            .with_file(format!("{}/", kind.dir())),
        );
        return Ok(());
    }

    for name in files {
        let rel = format!("{}/{}", kind.dir(), name);

        if !paths::is_plain_filename(&name) {
            issues.push(
                ValidationIssue::error(
                    IssueCode::ValidationFailed,
                    format!("Suspicious filename rejected: {name}"),
                )
                .with_file(rel),
            );
            continue;
        }

        let content = match io::read_to_string_safe(Path::new(&rel), root) {
            Ok(c) => c,
            Err(e) => {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::ValidationFailed,
                        format!("Failed to read {rel}: {e}"),
                    )
                    .with_file(rel),
                );
                continue;
            }
        };
        *files_scanned += 1;

        let fm = check_frontmatter(kind, &name, &content, &rel, issues);

        if let Some(marker) = kind.required_marker() {
            if !content.contains(marker) {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::InvalidStructure,
                        format!("{} {name} is missing an {marker} header", capitalized(kind)),
                    )
                    .with_file(rel.clone()),
                );
            }
        }

        match kind {
            ArtifactKind::Feature => {
                if let Some(caps) = feature_id_re().captures(&name) {
                    let depends_on = fm
                        .as_ref()
                        .map(|m| normalize_depends_on(m.get("depends_on")))
                        .unwrap_or_default();
                    features.push(ScannedFeature {
                        id: caps[1].to_string(),
                        depends_on,
                        file: rel,
                    });
                }
            }
            ArtifactKind::Decision => {
                // Known decision ids come from frontmatter, with the
                // filename-derived ADR id as a fallback alias.
                if let Some(id) = fm
                    .as_ref()
                    .and_then(|m| m.get("id"))
                    .and_then(|v| v.as_str())
                {
                    decision_ids.insert(id.to_string());
                }
                if let Some(caps) = decision_id_re().captures(&name) {
                    decision_ids.insert(format!("ADR-{}", &caps[1]));
                }
            }
            ArtifactKind::Handoff => {}
        }
    }

    Ok(())
}

/// Verify the required frontmatter keys for one artifact, reporting every
/// missing key in a single issue. Returns the parsed mapping when one exists
/// so later steps can reuse it.
fn check_frontmatter(
    kind: ArtifactKind,
    name: &str,
    content: &str,
    rel: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Mapping> {
    let fm = match parse_frontmatter(content) {
        Ok(m) => m,
        Err(e) => {
            issues.push(
                ValidationIssue::error(
                    IssueCode::InvalidFrontmatter,
                    format!("{} {name} has invalid frontmatter: {e}", capitalized(kind)),
                )
                .with_file(rel),
            );
            return None;
        }
    };

    if crate::frontmatter::extract_frontmatter(content).is_none() {
        issues.push(
            ValidationIssue::error(
                IssueCode::InvalidFrontmatter,
                format!(
                    "{} {name} has invalid frontmatter. Missing: frontmatter block (---)",
                    capitalized(kind)
                ),
            )
            .with_file(rel),
        );
        return None;
    }

    let missing: Vec<&str> = kind
        .required_keys()
        .iter()
        .filter(|key| {
            fm.get(**key)
                .map(|v| matches!(v, serde_yaml::Value::Null))
                .unwrap_or(true)
        })
        .copied()
        .collect();

    if !missing.is_empty() {
        issues.push(
            ValidationIssue::error(
                IssueCode::InvalidFrontmatter,
                format!(
                    "{} {name} has invalid frontmatter. Missing: {}",
                    capitalized(kind),
                    missing.join(", ")
                ),
            )
            .with_file(rel),
        );
    }

    Some(fm)
}

/// Existence check for every declared dependency, then cycle detection over
/// the feature-only graph. Independent and complementary: existence looks at
/// all references, structure only at feature-to-feature edges.
fn check_dependencies(
    features: &[ScannedFeature],
    decision_ids: &BTreeSet<String>,
    issues: &mut Vec<ValidationIssue>,
) {
    let feature_ids: BTreeSet<&str> = features.iter().map(|f| f.id.as_str()).collect();

    for feature in features {
        for dep in &feature.depends_on {
            if !feature_ids.contains(dep.as_str()) && !decision_ids.contains(dep) {
                issues.push(
                    ValidationIssue::error(
                        IssueCode::InvalidDependency,
                        format!("Feature {} depends on unknown artifact '{dep}'", feature.id),
                    )
                    .with_file(feature.file.clone()),
                );
            }
        }
    }

    let pairs: Vec<(&str, &[String])> = features
        .iter()
        .map(|f| (f.id.as_str(), f.depends_on.as_slice()))
        .collect();
    let graph = DependencyGraph::build(pairs);

    for cycle in graph.detect_cycles() {
        issues.push(ValidationIssue::error(
            IssueCode::CircularDependency,
            format!("Circular dependency detected: {}", cycle.join(" -> ")),
        ));
    }
}

fn capitalized(kind: ArtifactKind) -> String {
    let s = kind.as_str();
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
