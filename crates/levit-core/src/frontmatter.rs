use crate::error::{LevitError, Result};
use serde_yaml::{Mapping, Value};

/// Extract the raw frontmatter text between the opening and closing `---`
/// delimiter lines. Returns `None` when the document has no frontmatter
/// block — absence is not an error at this layer; required-ness is enforced
/// by the validation engine.
pub fn extract_frontmatter(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.first().map(|l| l.trim()) != Some("---") {
        return None;
    }
    let close = lines.iter().skip(1).position(|l| l.trim() == "---")?;
    Some(lines[1..close + 1].join("\n"))
}

/// Parse the YAML frontmatter block of a markdown document.
///
/// - No opening delimiter: empty mapping.
/// - Opening delimiter without a closing one: `InvalidFrontmatter` (hard error).
/// - YAML parse failure: `InvalidFrontmatter` carrying the parser message.
/// - Parse succeeds but yields a non-mapping (scalar, null): empty mapping.
pub fn parse_frontmatter(content: &str) -> Result<Mapping> {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.first().map(|l| l.trim()) != Some("---") {
        return Ok(Mapping::new());
    }
    let close = lines
        .iter()
        .skip(1)
        .position(|l| l.trim() == "---")
        .ok_or_else(|| {
            LevitError::InvalidFrontmatter("missing closing delimiter (---)".to_string())
        })?;
    let block = lines[1..close + 1].join("\n");

    let parsed: Value = serde_yaml::from_str(&block).map_err(|e| {
        LevitError::InvalidFrontmatter(format!("failed to parse frontmatter YAML: {e}"))
    })?;
    match parsed {
        Value::Mapping(m) => Ok(m),
        _ => Ok(Mapping::new()),
    }
}

/// Rebuild a document around an updated frontmatter mapping, preserving the
/// body after the closing delimiter byte-for-byte.
pub fn replace_frontmatter(content: &str, mapping: &Mapping) -> Result<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.first().map(|l| l.trim()) != Some("---") {
        return Err(LevitError::InvalidFrontmatter(
            "document has no frontmatter block".to_string(),
        ));
    }
    let close = lines
        .iter()
        .skip(1)
        .position(|l| l.trim() == "---")
        .ok_or_else(|| {
            LevitError::InvalidFrontmatter("missing closing delimiter (---)".to_string())
        })?
        + 1;
    let yaml = serde_yaml::to_string(mapping)?;
    let body = lines[close + 1..].join("\n");
    Ok(format!("---\n{yaml}---\n{body}"))
}

/// Normalize a `depends_on` value to an ordered list of trimmed id strings.
/// A bare string becomes a one-element list; a sequence keeps its order with
/// scalar elements coerced to strings; anything else is empty.
pub fn normalize_depends_on(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Vec::new()
            } else {
                vec![s.to_string()]
            }
        }
        Some(Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
