use crate::output::print_json;
use crate::root::require_initialized;
use anyhow::Context;
use levit_core::manifest::Manifest;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    require_initialized(root)?;

    let manifest = Manifest::sync(root).context("failed to sync levit.json")?;

    if json {
        print_json(&manifest)?;
    } else {
        println!(
            "Manifest synced: {} feature(s), {} role(s).",
            manifest.features.len(),
            manifest.roles.len()
        );
    }
    Ok(())
}
