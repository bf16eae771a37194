use crate::error::{LevitError, Result};
use crate::ids::next_sequential_id;
use crate::io;
use crate::manifest::Manifest;
use crate::paths;
use chrono::Utc;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static ADR_ID_RE: OnceLock<Regex> = OnceLock::new();

fn adr_id_re() -> &'static Regex {
    ADR_ID_RE.get_or_init(|| Regex::new(r"^ADR-(\d+)-").unwrap())
}

pub struct CreateDecisionOptions {
    pub title: String,
    pub feature_ref: Option<String>,
    pub id: Option<String>,
    pub overwrite: bool,
}

/// Create an Architecture Decision Record under `.levit/decisions` and
/// re-sync the manifest. Returns the project-relative path.
pub fn create(root: &Path, options: CreateDecisionOptions) -> Result<PathBuf> {
    let id = match options.id {
        Some(id) => id,
        None => next_sequential_id(&paths::decisions_dir(root), adr_id_re())?,
    };

    let slug = paths::slugify(&options.title);
    let file_name = format!("ADR-{id}-{slug}.md");
    if !paths::is_plain_filename(&file_name) {
        return Err(LevitError::ValidationFailed(format!(
            "invalid decision filename: {file_name}"
        )));
    }
    let rel = Path::new(paths::DECISIONS_DIR).join(&file_name);

    let date = Utc::now().format("%Y-%m-%d").to_string();
    let feature_ref = options.feature_ref.as_deref().unwrap_or("");
    let feature_line = if feature_ref.is_empty() {
        String::new()
    } else {
        format!("- **Feature**: {feature_ref}\n")
    };

    let content = format!(
        "---\n\
         id: ADR-{id}\n\
         status: draft\n\
         owner: human\n\
         last_updated: {date}\n\
         risk_level: low\n\
         depends_on: [{feature_ref}]\n\
         ---\n\
         \n\
         # ADR {id}: {title}\n\
         \n\
         - **Date**: {date}\n\
         - **Status**: [Draft / Proposed / Approved]\n\
         {feature_line}\
         \n\
         ## Context\n\
         [fill]\n\
         \n\
         ## Decision\n\
         [fill]\n\
         \n\
         ## Rationale\n\
         [fill]\n\
         \n\
         ## Alternatives Considered\n\
         [fill]\n\
         \n\
         ## Consequences\n\
         [fill]\n",
        title = options.title,
    );

    io::write_file_safe(&rel, root, &content, options.overwrite)?;
    Manifest::sync(root)?;
    Ok(rel)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
