mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{decision::DecisionSubcommand, feature::FeatureSubcommand, handoff::HandoffSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "levit",
    about = "Cognitive scaffolding for AI-driven development — features, decisions, handoffs",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from levit.json, .levit/ or .git/)
    #[arg(long, global = true, env = "LEVIT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize levit scaffolding in the current project
    Init {
        /// Project name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Validate the project's cognitive scaffolding
    Validate,

    /// Rebuild levit.json from the filesystem
    Sync,

    /// Manage feature intents
    Feature {
        #[command(subcommand)]
        subcommand: FeatureSubcommand,
    },

    /// Manage architecture decision records
    Decision {
        #[command(subcommand)]
        subcommand: DecisionSubcommand,
    },

    /// Manage agent handoffs
    Handoff {
        #[command(subcommand)]
        subcommand: HandoffSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name } => cmd::init::run(&root, name.as_deref()),
        Commands::Validate => cmd::validate::run(&root, cli.json),
        Commands::Sync => cmd::sync::run(&root, cli.json),
        Commands::Feature { subcommand } => cmd::feature::run(&root, subcommand, cli.json),
        Commands::Decision { subcommand } => cmd::decision::run(&root, subcommand, cli.json),
        Commands::Handoff { subcommand } => cmd::handoff::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
