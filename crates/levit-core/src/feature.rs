use crate::error::{LevitError, Result};
use crate::frontmatter::{parse_frontmatter, replace_frontmatter};
use crate::ids::next_sequential_id;
use crate::io;
use crate::manifest::{FeatureRef, Manifest};
use crate::paths;
use crate::types::FeatureStatus;
use chrono::Utc;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static FEATURE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn feature_id_re() -> &'static Regex {
    FEATURE_ID_RE.get_or_init(|| Regex::new(r"^(\d+)-").unwrap())
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

pub struct CreateFeatureOptions {
    pub title: String,
    pub slug: String,
    pub id: Option<String>,
    pub overwrite: bool,
}

/// Create a feature artifact and re-sync the manifest.
///
/// Unlike the scan paths, creation fails fast: a write failure aborts the
/// command rather than degrading. Returns the project-relative path.
pub fn create(root: &Path, options: CreateFeatureOptions) -> Result<PathBuf> {
    paths::validate_slug(&options.slug)?;

    let id = match options.id {
        Some(id) => id,
        None => next_sequential_id(&paths::features_dir(root), feature_id_re())?,
    };
    let file_name = format!("{id}-{}.md", options.slug);
    let rel = Path::new(paths::FEATURES_DIR).join(&file_name);

    let date = today();
    let content = format!(
        "---\n\
         id: \"{id}\"\n\
         status: active\n\
         owner: human\n\
         last_updated: {date}\n\
         risk_level: low\n\
         depends_on: []\n\
         ---\n\
         \n\
         # INTENT: {title}\n\
         \n\
         ## 1. Vision (The \"Why\")\n\
         - **User Story**: [fill]\n\
         - **Priority**: [Low / Medium / High / Critical]\n\
         \n\
         ## 2. Success Criteria (The \"What\")\n\
         - [ ] Criterion 1\n\
         \n\
         ## 3. Boundaries (The \"No\")\n\
         - Non-goal 1\n\
         \n\
         ## 4. Technical Constraints\n\
         - [fill]\n\
         \n\
         ## 5. Agent Task\n\
         - [fill]\n",
        title = options.title,
    );

    io::write_file_safe(&rel, root, &content, options.overwrite)?;
    Manifest::sync(root)?;
    Ok(rel)
}

/// List features from the manifest cache.
pub fn list(root: &Path) -> Result<Vec<FeatureRef>> {
    Ok(Manifest::read(root)?.features)
}

/// Rewrite a feature's frontmatter in place with a new status and a fresh
/// `last_updated`, preserving the body, then re-sync the manifest.
pub fn update_status(root: &Path, feature_id: &str, status: FeatureStatus) -> Result<()> {
    let manifest = Manifest::read(root)?;
    let feature = manifest
        .features
        .iter()
        .find(|f| f.id == feature_id)
        .ok_or_else(|| LevitError::FeatureNotFound(feature_id.to_string()))?;

    let rel = Path::new(&feature.path);
    let content = io::read_to_string_safe(rel, root)?;

    let mut fm = parse_frontmatter(&content)?;
    if fm.is_empty() {
        return Err(LevitError::InvalidFrontmatter(format!(
            "{} has no frontmatter block",
            feature.path
        )));
    }
    fm.insert("status".into(), status.as_str().into());
    fm.insert("last_updated".into(), today().into());

    let updated = replace_frontmatter(&content, &fm)?;
    io::atomic_write(&root.join(rel), updated.as_bytes())?;

    Manifest::sync(root)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
