use crate::output::print_json;
use crate::root::require_initialized;
use anyhow::Context;
use clap::Subcommand;
use levit_core::handoff::{self, CreateHandoffOptions};
use std::path::Path;

#[derive(Subcommand)]
pub enum HandoffSubcommand {
    /// Create a handoff document for an agent taking over a feature
    New {
        /// Feature file the agent should work from
        /// (e.g. .levit/features/001-login.md)
        feature: String,

        /// Receiving role (e.g. builder, reviewer)
        role: String,

        /// Overwrite an existing file with the same name
        #[arg(long)]
        overwrite: bool,
    },
}

pub fn run(root: &Path, subcommand: HandoffSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        HandoffSubcommand::New {
            feature,
            role,
            overwrite,
        } => new(root, feature, role, overwrite, json),
    }
}

fn new(
    root: &Path,
    feature: String,
    role: String,
    overwrite: bool,
    json: bool,
) -> anyhow::Result<()> {
    require_initialized(root)?;

    let rel = handoff::create(
        root,
        CreateHandoffOptions {
            feature: feature.clone(),
            role: role.clone(),
            overwrite,
        },
    )
    .context("failed to create handoff")?;

    if json {
        print_json(&serde_json::json!({
            "path": rel,
            "feature": feature,
            "role": role,
        }))?;
    } else {
        println!("Created: {}", rel.display());
        println!("Hand this file to the {role} agent as its entry point.");
    }
    Ok(())
}
