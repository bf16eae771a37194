use crate::error::Result;
use crate::frontmatter;
use crate::io;
use crate::paths;
use crate::types::{FeatureStatus, GovernanceLevel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Manifest records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRef {
    pub id: String,
    pub slug: String,
    pub status: FeatureStatus,
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Governance {
    pub autonomy_level: GovernanceLevel,
    pub risk_tolerance: GovernanceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
    #[serde(default)]
    pub allowed_dependencies: Vec<String>,
    #[serde(default)]
    pub forbidden_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestPaths {
    pub features: String,
    pub decisions: String,
    pub handoffs: String,
}

/// The single derived JSON summary of a project, stored at `<root>/levit.json`.
///
/// `features` and `roles` are a cache of what is on disk: `sync` always
/// recomputes them fully from the filesystem. There is deliberately no
/// incremental-update API — partial updates could drift from filesystem
/// truth. `project`, `governance`, and `constraints` are user-owned and
/// preserved across syncs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub project: ProjectInfo,
    pub governance: Governance,
    #[serde(default)]
    pub features: Vec<FeatureRef>,
    #[serde(default)]
    pub roles: Vec<RoleRef>,
    pub constraints: Constraints,
    pub paths: ManifestPaths,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            project: ProjectInfo {
                name: "my-project".to_string(),
                description: Some("AI-driven development project powered by levit".to_string()),
            },
            governance: Governance {
                autonomy_level: GovernanceLevel::Low,
                risk_tolerance: GovernanceLevel::Low,
            },
            features: Vec::new(),
            roles: Vec::new(),
            constraints: Constraints {
                max_file_size: Some(1_000_000),
                allowed_dependencies: Vec::new(),
                forbidden_patterns: Vec::new(),
            },
            paths: ManifestPaths {
                features: paths::FEATURES_DIR.to_string(),
                decisions: paths::DECISIONS_DIR.to_string(),
                handoffs: paths::HANDOFF_DIR.to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Scan patterns
// ---------------------------------------------------------------------------

static FEATURE_FILE_RE: OnceLock<Regex> = OnceLock::new();
static INTENT_RE: OnceLock<Regex> = OnceLock::new();

fn feature_file_re() -> &'static Regex {
    FEATURE_FILE_RE.get_or_init(|| Regex::new(r"^(\d+)-(.+)\.md$").unwrap())
}

fn intent_re() -> &'static Regex {
    INTENT_RE.get_or_init(|| Regex::new(r"# INTENT:\s*(.+)").unwrap())
}

// ---------------------------------------------------------------------------
// Persistence and sync
// ---------------------------------------------------------------------------

impl Manifest {
    /// Read the manifest, or the default skeleton if none exists yet.
    pub fn read(root: &Path) -> Result<Self> {
        let path = paths::manifest_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Persist the manifest, pretty-printed, as a whole-file atomic write.
    pub fn write(&self, root: &Path) -> Result<()> {
        let mut data = serde_json::to_string_pretty(self)?;
        data.push('\n');
        io::atomic_write(&paths::manifest_path(root), data.as_bytes())
    }

    /// Rebuild `features` and `roles` from the filesystem and persist the
    /// result. User-owned sections (`project`, `governance`, `constraints`)
    /// are preserved from the existing manifest. Nothing is written until
    /// both scans have completed.
    pub fn sync(root: &Path) -> Result<Self> {
        let mut manifest = Self::read(root)?;
        manifest.features = scan_features(root)?;
        manifest.roles = scan_roles(root)?;
        manifest.write(root)?;
        Ok(manifest)
    }
}

/// Scan the features directory into manifest records.
///
/// One malformed artifact must never abort the sync: unreadable files are
/// skipped with a warning and unparsable frontmatter degrades to defaults.
fn scan_features(root: &Path) -> Result<Vec<FeatureRef>> {
    let dir = paths::features_dir(root);
    let mut refs = Vec::new();

    for name in io::list_dir(&dir)? {
        if !name.ends_with(".md") || name == "README.md" || name == "INTENT.md" {
            continue;
        }
        if !paths::is_plain_filename(&name) {
            tracing::warn!(file = %name, "skipping suspicious filename in features dir");
            continue;
        }

        let rel = Path::new(paths::FEATURES_DIR).join(&name);
        let content = match io::read_to_string_safe(&rel, root) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "skipping unreadable feature");
                continue;
            }
        };
        let fm = frontmatter::parse_frontmatter(&content).unwrap_or_default();

        let (id, slug) = match feature_file_re().captures(&name) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string()),
            None => (
                "unknown".to_string(),
                name.trim_end_matches(".md").to_string(),
            ),
        };

        let title = intent_re()
            .captures(&content)
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_else(|| slug.clone());

        let status = fm
            .get("status")
            .and_then(|v| v.as_str())
            .and_then(|s| FeatureStatus::from_str(s).ok())
            .unwrap_or(FeatureStatus::Active);

        refs.push(FeatureRef {
            id,
            slug,
            status,
            title,
            path: format!("{}/{}", paths::FEATURES_DIR, name),
        });
    }

    Ok(refs)
}

/// Scan the roles directory. A role's description is its first non-blank
/// line with any leading `#`s stripped.
fn scan_roles(root: &Path) -> Result<Vec<RoleRef>> {
    let dir = paths::roles_dir(root);
    let mut refs = Vec::new();

    for name in io::list_dir(&dir)? {
        if !name.ends_with(".md") || name == "README.md" {
            continue;
        }
        if !paths::is_plain_filename(&name) {
            tracing::warn!(file = %name, "skipping suspicious filename in roles dir");
            continue;
        }

        let rel = Path::new(paths::ROLES_DIR).join(&name);
        let content = match io::read_to_string_safe(&rel, root) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "skipping unreadable role");
                continue;
            }
        };

        let description = content
            .lines()
            .find(|l| !l.trim().is_empty())
            .map(|l| l.trim_start_matches('#').trim().to_string());

        refs.push(RoleRef {
            name: name.trim_end_matches(".md").to_string(),
            description,
            path: format!("{}/{}", paths::ROLES_DIR, name),
        });
    }

    Ok(refs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
