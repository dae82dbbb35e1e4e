use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use tracing::info;

use flagline_synth::{
    synthesize, synthesize_patch, ChangeType, Command as SynthCommand, Patch, SynthesisOptions,
    TouchedFields,
};
use flagline_types::{check_compatible, TargetingConfiguration};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Commands(args) => cmd_commands(args, &cli.format),
        Command::Patch(args) => cmd_patch(args, &cli.format),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn cmd_commands(args: SynthArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (baseline, draft, options) = prepare(&args)?;
    let commands = synthesize(&baseline, &draft, &options);
    info!(commands = commands.len(), "synthesized commands");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&commands)?),
        OutputFormat::Text => {
            if commands.is_empty() {
                println!("No changes.");
            }
            for command in &commands {
                println!("{}", describe_command(command));
            }
        }
    }
    Ok(())
}

fn cmd_patch(args: SynthArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (baseline, draft, options) = prepare(&args)?;
    let patch = synthesize_patch(&baseline, &draft, &options);
    info!(changes = patch.change_count(), "synthesized patch");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&patch)?),
        OutputFormat::Text => {
            if patch.is_empty() {
                println!("No changes.");
            }
            for line in describe_patch(&patch) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    snapshot
        .validate()
        .with_context(|| format!("{} is not a valid snapshot", args.snapshot.display()))?;
    println!(
        "{} {} ({} rules, {} targets, {} prerequisites)",
        "✓".green().bold(),
        args.snapshot.display(),
        snapshot.rules.len(),
        snapshot.targets.len(),
        snapshot.prerequisites.len()
    );
    Ok(())
}

fn prepare(
    args: &SynthArgs,
) -> anyhow::Result<(TargetingConfiguration, TargetingConfiguration, SynthesisOptions)> {
    let baseline = load_snapshot(&args.baseline)?;
    let draft = load_snapshot(&args.draft)?;

    if !args.no_validate {
        baseline.validate().context("invalid baseline")?;
        draft.validate().context("invalid draft")?;
        check_compatible(&baseline, &draft).context("baseline and draft targets disagree")?;
    }

    let options = build_options(args)?;
    Ok((baseline, draft, options))
}

fn load_snapshot(path: &Path) -> anyhow::Result<TargetingConfiguration> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn build_options(args: &SynthArgs) -> anyhow::Result<SynthesisOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => SynthesisOptions::default(),
    };

    if args.all {
        let reset = options.touched.reset_sampling_seed;
        options.touched = TouchedFields::all();
        options.touched.reset_sampling_seed = reset;
    }
    for field in &args.touch {
        if !options.touched.touch(field) {
            bail!("unknown field: {field}");
        }
    }
    if args.reset_sampling_seed {
        options.touched.reset_sampling_seed = true;
    }
    Ok(options)
}

fn describe_command(command: &SynthCommand) -> String {
    let detail = match command {
        SynthCommand::EnableFeature
        | SynthCommand::DisableFeature
        | SynthCommand::ResetSamplingSeed => String::new(),
        SynthCommand::AddUserToVariation { variation, user }
        | SynthCommand::RemoveUserFromVariation { variation, user } => {
            format!("{user} @ {variation}")
        }
        SynthCommand::AddRule { rule } => {
            format!("{} ({} clauses)", rule.id, rule.clauses.len())
        }
        SynthCommand::DeleteRule { rule_id } => rule_id.to_string(),
        SynthCommand::ChangeRulesOrder { rule_ids } => join(rule_ids),
        SynthCommand::AddClause { rule_id, clause } => format!("{rule_id}/{}", clause.id),
        SynthCommand::DeleteClause { rule_id, clause_id } => format!("{rule_id}/{clause_id}"),
        SynthCommand::ChangeClauseAttribute {
            rule_id,
            clause_id,
            attribute,
        } => format!("{rule_id}/{clause_id} = {attribute}"),
        SynthCommand::ChangeClauseOperator {
            rule_id,
            clause_id,
            operator,
        } => format!("{rule_id}/{clause_id} = {operator}"),
        SynthCommand::AddClauseValue {
            rule_id,
            clause_id,
            value,
        }
        | SynthCommand::RemoveClauseValue {
            rule_id,
            clause_id,
            value,
        } => format!("{rule_id}/{clause_id} {value}"),
        SynthCommand::ChangeRuleStrategy { rule_id, strategy } => {
            format!("{rule_id} -> {}", strategy.kind())
        }
        SynthCommand::ChangeFixedStrategy { rule_id, strategy } => {
            format!("{rule_id} -> {}", strategy.variation)
        }
        SynthCommand::ChangeRolloutStrategy { rule_id, strategy } => {
            format!("{rule_id} -> {} buckets", strategy.variations.len())
        }
        SynthCommand::ChangeDefaultStrategy { strategy } => strategy.kind().to_string(),
        SynthCommand::ChangeOffVariation { variation } => variation.to_string(),
        SynthCommand::AddPrerequisite { prerequisite }
        | SynthCommand::ChangePrerequisiteVariation { prerequisite } => {
            format!("{} = {}", prerequisite.feature_id, prerequisite.variation)
        }
        SynthCommand::RemovePrerequisite { feature_id } => feature_id.to_string(),
    };

    let name = command.kind_name();
    let name = if name.starts_with("Add") || name == "EnableFeature" {
        name.green()
    } else if name.starts_with("Delete") || name.starts_with("Remove") || name == "DisableFeature" {
        name.red()
    } else {
        name.yellow()
    };

    if detail.is_empty() {
        name.to_string()
    } else {
        format!("{name} {detail}")
    }
}

fn describe_patch(patch: &Patch) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(enabled) = patch.enabled {
        lines.push(format!("enabled = {enabled}"));
    }
    for change in &patch.prerequisite_changes {
        lines.push(format!(
            "{} prerequisite {} = {}",
            label(change.change_type),
            change.prerequisite.feature_id,
            change.prerequisite.variation
        ));
    }
    for change in &patch.target_changes {
        lines.push(format!(
            "{} target {}: {}",
            label(change.change_type),
            change.variation,
            join(&change.users)
        ));
    }
    for change in &patch.rule_changes {
        lines.push(format!("{} rule {}", label(change.change_type()), change.rule_id()));
    }
    if let Some(order) = &patch.rule_order {
        lines.push(format!("{} {}", "order".yellow(), join(&order.rule_ids)));
    }
    if let Some(strategy) = &patch.default_strategy {
        lines.push(format!("default strategy = {}", strategy.kind()));
    }
    if let Some(variation) = &patch.off_variation {
        lines.push(format!("off variation = {variation}"));
    }
    lines
}

fn label(change_type: ChangeType) -> colored::ColoredString {
    match change_type {
        ChangeType::Create => "create".green(),
        ChangeType::Update => "update".yellow(),
        ChangeType::Delete => "delete".red(),
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
