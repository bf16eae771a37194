use anyhow::Context;
use levit_core::{io, manifest::Manifest, paths};
use std::path::Path;

const SOCIAL_CONTRACT_CONTENT: &str = "\
# Social Contract

This project is developed collaboratively by humans and AI agents.

## Principles

1. **Intent before implementation** — every feature starts with an INTENT
   document describing the why, the what, and the boundaries.
2. **Decisions are recorded** — consequential technical choices become ADRs
   under `.levit/decisions/`, never tribal knowledge.
3. **Handoffs are explicit** — when work moves between humans and agents (or
   between agents), a handoff document states what to read, the boundaries,
   and the expected deliverables.
4. **Small, verifiable diffs** — changes stay atomic and reviewable.

## Escalation

When an agent is uncertain whether a change fits the declared boundaries, it
stops and asks instead of guessing.
";

const AGENT_CONTRACT_CONTENT: &str = "\
# Agent Contract

Rules of engagement for AI agents working in this repository.

- Read `SOCIAL_CONTRACT.md` and the relevant feature intent before writing
  any code.
- Stay inside the Boundaries section of the feature you were handed.
- Record consequential decisions: `levit decision new \"<title>\"`.
- Run `levit validate` before declaring work complete.
- Never edit `levit.json` by hand; it is derived. Run `levit sync` instead.
";

const AGENT_ONBOARDING_CONTENT: &str = "\
# Agent Onboarding

Start here. In order:

1. `SOCIAL_CONTRACT.md` — how this project is governed.
2. `.levit/AGENT_CONTRACT.md` — your rules of engagement.
3. `levit.json` — the current project manifest (features, roles, constraints).
4. The feature intent you were handed (`.levit/features/<id>-<slug>.md`).

Useful commands:

- `levit validate` — check the project scaffolding.
- `levit feature list` — see all tracked features.
- `levit sync` — rebuild the manifest after manual file changes.
";

const SUBMIT_FOR_REVIEW_CONTENT: &str = "\
# Workflow: submit for review

1. Run `levit validate`; fix every error it reports.
2. Summarize what changed and why, in two or three sentences.
3. List the commands a reviewer should run to verify.
4. Note open questions and risks explicitly.
";

const FEATURES_README_CONTENT: &str = "\
# Features

One markdown file per feature, named `<id>-<slug>.md` (e.g. `001-login.md`).
Each file carries YAML frontmatter and a `# INTENT:` heading. Created with
`levit feature new <slug> --title \"...\"`.
";

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let project_name = name
        .map(str::to_string)
        .or_else(|| root.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "project".to_string());

    println!("Initializing levit in: {}", root.display());

    // 1. Directory tree
    let dirs = [
        paths::LEVIT_DIR,
        paths::FEATURES_DIR,
        paths::DECISIONS_DIR,
        paths::HANDOFF_DIR,
        paths::ROLES_DIR,
        paths::WORKFLOWS_DIR,
    ];
    for dir in dirs {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    // 2. Core documents, only where missing — user edits are never clobbered
    let documents: [(&str, &str); 5] = [
        (paths::SOCIAL_CONTRACT_MD, SOCIAL_CONTRACT_CONTENT),
        (paths::AGENT_CONTRACT_MD, AGENT_CONTRACT_CONTENT),
        (paths::AGENT_ONBOARDING_MD, AGENT_ONBOARDING_CONTENT),
        (
            ".levit/workflows/submit-for-review.md",
            SUBMIT_FOR_REVIEW_CONTENT,
        ),
        (".levit/features/README.md", FEATURES_README_CONTENT),
    ];
    for (rel, content) in documents {
        let p = root.join(rel);
        if io::write_if_missing(&p, content.as_bytes())
            .with_context(|| format!("failed to write {rel}"))?
        {
            println!("  created: {rel}");
        } else {
            println!("  exists:  {rel}");
        }
    }

    // 3. Manifest
    if root.join(paths::MANIFEST_FILE).exists() {
        println!("  exists:  {}", paths::MANIFEST_FILE);
    } else {
        let mut manifest = Manifest::default();
        manifest.project.name = project_name;
        manifest
            .write(root)
            .context("failed to write levit.json")?;
        println!("  created: {}", paths::MANIFEST_FILE);
    }

    println!("\nlevit initialized successfully.");
    println!("Next: levit feature new <slug> --title \"...\"");

    Ok(())
}
