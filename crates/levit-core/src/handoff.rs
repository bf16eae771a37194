use crate::error::{LevitError, Result};
use crate::io;
use crate::manifest::Manifest;
use crate::paths;
use chrono::Utc;
use std::path::{Path, PathBuf};

pub struct CreateHandoffOptions {
    pub feature: String,
    pub role: String,
    pub overwrite: bool,
}

/// Create an agent handoff document under `.levit/handoff` and re-sync the
/// manifest. The filename is `<date>-<feature-stem>-<role>.md`; the handoff
/// id is `HAND-<date>-<role>`.
pub fn create(root: &Path, options: CreateHandoffOptions) -> Result<PathBuf> {
    let role = options.role.trim().to_lowercase();
    let date = Utc::now().format("%Y-%m-%d").to_string();

    let feature_stem = Path::new(&options.feature)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !paths::is_plain_filename(&feature_stem) {
        return Err(LevitError::ValidationFailed(format!(
            "invalid feature reference: {}",
            options.feature
        )));
    }

    let file_name = format!("{date}-{feature_stem}-{role}.md");
    if !paths::is_plain_filename(&file_name) {
        return Err(LevitError::ValidationFailed(format!(
            "invalid handoff filename: {file_name}"
        )));
    }
    let rel = Path::new(paths::HANDOFF_DIR).join(&file_name);

    let content = format!(
        "---\n\
         id: HAND-{date}-{role}\n\
         status: active\n\
         owner: {role}\n\
         last_updated: {date}\n\
         risk_level: low\n\
         depends_on: [{feature}]\n\
         ---\n\
         \n\
         # Agent Handoff\n\
         \n\
         - **Date**: {date}\n\
         - **Role**: {role}\n\
         - **Feature**: {feature}\n\
         \n\
         ## What to read first\n\
         - SOCIAL_CONTRACT.md\n\
         - .levit/AGENT_ONBOARDING.md\n\
         - {feature}\n\
         \n\
         ## Boundaries\n\
         Follow the Boundaries section of the feature intent strictly.\n\
         \n\
         ## Deliverables\n\
         - A minimal, atomic diff\n\
         - A short summary: what changed + why\n\
         - How to verify (commands to run)\n\
         - Open questions / risks\n\
         \n\
         ## Review protocol\n\
         Follow: .levit/workflows/submit-for-review.md\n",
        feature = options.feature,
    );

    io::write_file_safe(&rel, root, &content, options.overwrite)?;
    Manifest::sync(root)?;
    Ok(rel)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_writes_handoff() {
        let dir = TempDir::new().unwrap();
        let rel = create(
            dir.path(),
            CreateHandoffOptions {
                feature: ".levit/features/001-login.md".to_string(),
                role: "Builder".to_string(),
                overwrite: false,
            },
        )
        .unwrap();

        let name = rel.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("-001-login-builder.md"));

        let content = std::fs::read_to_string(dir.path().join(&rel)).unwrap();
        assert!(content.contains("owner: builder"));
        assert!(content.contains("# Agent Handoff"));
        assert!(content.contains("depends_on: [.levit/features/001-login.md]"));
    }

    #[test]
    fn traversal_stem_rejected() {
        let dir = TempDir::new().unwrap();
        let err = create(
            dir.path(),
            CreateHandoffOptions {
                feature: "evil..md.md".to_string(),
                role: "builder".to_string(),
                overwrite: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, LevitError::ValidationFailed(_)));
    }

    #[test]
    fn role_folded_to_lowercase_in_filename() {
        let dir = TempDir::new().unwrap();
        let rel = create(
            dir.path(),
            CreateHandoffOptions {
                feature: "001-login.md".to_string(),
                role: " QA ".to_string(),
                overwrite: false,
            },
        )
        .unwrap();
        let name = rel.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("-001-login-qa.md"));

        let manifest = Manifest::read(dir.path()).unwrap();
        // Handoffs are not features; the sync only creates the manifest.
        assert!(manifest.features.is_empty());
    }
}
