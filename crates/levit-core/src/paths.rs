use crate::error::{LevitError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const LEVIT_DIR: &str = ".levit";
pub const FEATURES_DIR: &str = ".levit/features";
pub const DECISIONS_DIR: &str = ".levit/decisions";
pub const HANDOFF_DIR: &str = ".levit/handoff";
pub const ROLES_DIR: &str = ".levit/roles";
pub const WORKFLOWS_DIR: &str = ".levit/workflows";

pub const MANIFEST_FILE: &str = "levit.json";

pub const SOCIAL_CONTRACT_MD: &str = "SOCIAL_CONTRACT.md";
pub const AGENT_CONTRACT_MD: &str = ".levit/AGENT_CONTRACT.md";
pub const AGENT_ONBOARDING_MD: &str = ".levit/AGENT_ONBOARDING.md";

/// Files whose existence the validation engine requires.
pub const CORE_FILES: &[&str] = &[SOCIAL_CONTRACT_MD, AGENT_CONTRACT_MD, AGENT_ONBOARDING_MD];

/// Directories whose existence the validation engine requires.
pub const CORE_DIRS: &[&str] = &[FEATURES_DIR, DECISIONS_DIR, HANDOFF_DIR];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn levit_dir(root: &Path) -> PathBuf {
    root.join(LEVIT_DIR)
}

pub fn features_dir(root: &Path) -> PathBuf {
    root.join(FEATURES_DIR)
}

pub fn decisions_dir(root: &Path) -> PathBuf {
    root.join(DECISIONS_DIR)
}

pub fn handoff_dir(root: &Path) -> PathBuf {
    root.join(HANDOFF_DIR)
}

pub fn roles_dir(root: &Path) -> PathBuf {
    root.join(ROLES_DIR)
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(LevitError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

/// Lowercase a free-form title into a slug ("My Feature!" -> "my-feature").
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_dash = true;
    for c in input.trim().chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// True if `name` is a plain filename: no separators, no traversal sequences.
/// Scanner entries that fail this check are skipped, not fatal.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
