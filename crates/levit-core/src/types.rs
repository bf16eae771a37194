use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FeatureStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    Active,
    Draft,
    Deprecated,
    Completed,
}

impl FeatureStatus {
    pub fn all() -> &'static [FeatureStatus] {
        &[
            FeatureStatus::Active,
            FeatureStatus::Draft,
            FeatureStatus::Deprecated,
            FeatureStatus::Completed,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureStatus::Active => "active",
            FeatureStatus::Draft => "draft",
            FeatureStatus::Deprecated => "deprecated",
            FeatureStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeatureStatus {
    type Err = crate::error::LevitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(FeatureStatus::Active),
            "draft" => Ok(FeatureStatus::Draft),
            "deprecated" => Ok(FeatureStatus::Deprecated),
            "completed" => Ok(FeatureStatus::Completed),
            _ => Err(crate::error::LevitError::ValidationFailed(format!(
                "unknown feature status: {s}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

/// The three artifact variants share a frontmatter shape; per-kind nuance
/// (body markers, directories) hangs off this discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Feature,
    Decision,
    Handoff,
}

impl ArtifactKind {
    pub fn all() -> &'static [ArtifactKind] {
        &[
            ArtifactKind::Feature,
            ArtifactKind::Decision,
            ArtifactKind::Handoff,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Feature => "feature",
            ArtifactKind::Decision => "decision",
            ArtifactKind::Handoff => "handoff",
        }
    }

    /// Directory (relative to the project root) where this kind lives.
    pub fn dir(self) -> &'static str {
        match self {
            ArtifactKind::Feature => crate::paths::FEATURES_DIR,
            ArtifactKind::Decision => crate::paths::DECISIONS_DIR,
            ArtifactKind::Handoff => crate::paths::HANDOFF_DIR,
        }
    }

    /// Frontmatter keys that must be present and non-null for this kind.
    pub fn required_keys(self) -> &'static [&'static str] {
        &["id", "status", "owner", "last_updated", "risk_level", "depends_on"]
    }

    /// Body marker the kind requires, if any.
    pub fn required_marker(self) -> Option<&'static str> {
        match self {
            ArtifactKind::Feature => Some("# INTENT:"),
            _ => None,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GovernanceLevel
// ---------------------------------------------------------------------------

/// Shared low/medium/high scale for autonomy_level and risk_tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for GovernanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GovernanceLevel::Low => "low",
            GovernanceLevel::Medium => "medium",
            GovernanceLevel::High => "high",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
