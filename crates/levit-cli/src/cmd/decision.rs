use crate::output::print_json;
use crate::root::require_initialized;
use anyhow::Context;
use clap::Subcommand;
use levit_core::decision::{self, CreateDecisionOptions};
use std::path::Path;

#[derive(Subcommand)]
pub enum DecisionSubcommand {
    /// Create a new architecture decision record
    New {
        /// Decision title (e.g. "Use Postgres for persistence")
        title: String,

        /// Feature id this decision belongs to (lands in depends_on)
        #[arg(long)]
        feature: Option<String>,

        /// Explicit numeric id instead of the next sequential one
        #[arg(long)]
        id: Option<String>,

        /// Overwrite an existing file with the same name
        #[arg(long)]
        overwrite: bool,
    },
}

pub fn run(root: &Path, subcommand: DecisionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        DecisionSubcommand::New {
            title,
            feature,
            id,
            overwrite,
        } => new(root, title, feature, id, overwrite, json),
    }
}

fn new(
    root: &Path,
    title: String,
    feature: Option<String>,
    id: Option<String>,
    overwrite: bool,
    json: bool,
) -> anyhow::Result<()> {
    require_initialized(root)?;

    let rel = decision::create(
        root,
        CreateDecisionOptions {
            title: title.clone(),
            feature_ref: feature,
            id,
            overwrite,
        },
    )
    .context("failed to create decision record")?;

    if json {
        print_json(&serde_json::json!({
            "path": rel,
            "title": title,
        }))?;
    } else {
        println!("Created: {}", rel.display());
        println!("Fill in Context, Decision, Rationale, Alternatives, Consequences.");
    }
    Ok(())
}
