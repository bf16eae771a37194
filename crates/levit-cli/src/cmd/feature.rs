use crate::output::{print_json, print_table};
use crate::root::require_initialized;
use anyhow::Context;
use clap::Subcommand;
use levit_core::feature::{self, CreateFeatureOptions};
use levit_core::types::FeatureStatus;
use std::path::Path;
use std::str::FromStr;

#[derive(Subcommand)]
pub enum FeatureSubcommand {
    /// Create a new feature intent document
    New {
        /// Kebab-case feature slug (e.g. user-login)
        slug: String,

        /// Human-readable title (default: derived from the slug)
        #[arg(long)]
        title: Option<String>,

        /// Explicit numeric id instead of the next sequential one
        #[arg(long)]
        id: Option<String>,

        /// Overwrite an existing file with the same name
        #[arg(long)]
        overwrite: bool,
    },

    /// List tracked features
    List,

    /// Change a feature's status (active, draft, deprecated, completed)
    Status {
        /// Feature id (e.g. 001)
        id: String,

        /// New status
        status: String,
    },
}

pub fn run(root: &Path, subcommand: FeatureSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        FeatureSubcommand::New {
            slug,
            title,
            id,
            overwrite,
        } => new(root, slug, title, id, overwrite, json),
        FeatureSubcommand::List => list(root, json),
        FeatureSubcommand::Status { id, status } => status_cmd(root, &id, &status, json),
    }
}

fn new(
    root: &Path,
    slug: String,
    title: Option<String>,
    id: Option<String>,
    overwrite: bool,
    json: bool,
) -> anyhow::Result<()> {
    require_initialized(root)?;

    let title = title.unwrap_or_else(|| title_from_slug(&slug));
    let rel = feature::create(
        root,
        CreateFeatureOptions {
            title: title.clone(),
            slug,
            id,
            overwrite,
        },
    )
    .context("failed to create feature")?;

    if json {
        print_json(&serde_json::json!({
            "path": rel,
            "title": title,
        }))?;
    } else {
        println!("Created: {}", rel.display());
        println!("Next: fill in the INTENT sections, then run 'levit validate'.");
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    require_initialized(root)?;

    let features = feature::list(root).context("failed to list features")?;

    if json {
        print_json(&features)?;
    } else if features.is_empty() {
        println!("No features yet. Create one: levit feature new <slug>");
    } else {
        let rows = features
            .iter()
            .map(|f| {
                vec![
                    f.id.clone(),
                    f.status.to_string(),
                    f.title.clone(),
                    f.path.clone(),
                ]
            })
            .collect();
        print_table(&["ID", "STATUS", "TITLE", "PATH"], rows);
    }
    Ok(())
}

fn status_cmd(root: &Path, id: &str, status: &str, json: bool) -> anyhow::Result<()> {
    require_initialized(root)?;

    let status = FeatureStatus::from_str(status).with_context(|| {
        let known = FeatureStatus::all()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("expected one of: {known}")
    })?;

    feature::update_status(root, id, status)
        .with_context(|| format!("failed to update feature {id}"))?;

    if json {
        print_json(&serde_json::json!({
            "id": id,
            "status": status,
        }))?;
    } else {
        println!("Feature {id} is now {status}.");
    }
    Ok(())
}

fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
