use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "flagline",
    about = "Reconcile feature flag targeting edits into change commands",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the immediate-mode command list
    Commands(SynthArgs),
    /// Print the scheduled-mode patch
    Patch(SynthArgs),
    /// Check a snapshot for duplicate ids, illegal operators, and partial rollouts
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct SynthArgs {
    /// Last persisted configuration (JSON)
    #[arg(long)]
    pub baseline: PathBuf,
    /// Locally edited configuration (JSON)
    #[arg(long)]
    pub draft: PathBuf,
    /// Synthesis options (TOML)
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// Mark a field as touched (enabled, prerequisites, targets, rules,
    /// default_strategy, off_variation, reset_sampling_seed)
    #[arg(long = "touch", value_name = "FIELD")]
    pub touch: Vec<String>,
    /// Mark every field as touched
    #[arg(long)]
    pub all: bool,
    /// Request a sampling seed reset
    #[arg(long)]
    pub reset_sampling_seed: bool,
    /// Skip snapshot validation before synthesis
    #[arg(long)]
    pub no_validate: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    pub snapshot: PathBuf,
}
