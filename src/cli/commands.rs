//! Command implementations for the lexigraph CLI.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::algebra;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::graph::RelationTriple;
use crate::lexicon::{Lexicon, LexiconConfig, LexiconSource, PersistFormat};

/// Execute a CLI command.
pub fn execute_command(args: LexigraphArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Stats(stats_args) => show_stats(stats_args, config, &args),
        Command::Lookup(lookup_args) => lookup(lookup_args, config, &args),
        Command::Show(show_args) => show_synset(show_args, config, &args),
        Command::Path(path_args) => shortest_path(path_args, config, &args),
        Command::Ancestor(ancestor_args) => common_ancestor(ancestor_args, config, &args),
        Command::Walk(walk_args) => walk(walk_args, config, &args),
        Command::Convert(convert_args) => convert(convert_args, config, &args),
        Command::Diff(diff_args) => diff(diff_args, config, &args),
    }
}

fn load_config(args: &LexigraphArgs) -> Result<LexiconConfig> {
    match &args.config {
        Some(path) => {
            debug!("Reading configuration from {}", path.display());
            LexiconConfig::from_json_file(path)
        }
        None => Ok(LexiconConfig::default()),
    }
}

fn open_lexicon(path: &Path, format: PersistFormat, config: LexiconConfig) -> Result<Lexicon> {
    let source = LexiconSource::Explicit {
        path: path.to_path_buf(),
        format,
    };
    Lexicon::open(&source, config)
}

/// Show lexicon statistics.
fn show_stats(args: &StatsArgs, config: LexiconConfig, cli_args: &LexigraphArgs) -> Result<()> {
    let lexicon = open_lexicon(&args.input.lexicon, args.input.format(), config)?;
    output_result(
        &format!("Statistics for {}", args.input.lexicon.display()),
        &lexicon.stats(),
        cli_args,
    )
}

/// Find synsets by literal.
fn lookup(args: &LookupArgs, config: LexiconConfig, cli_args: &LexigraphArgs) -> Result<()> {
    let lexicon = open_lexicon(&args.input.lexicon, args.input.format(), config)?;

    let mut synsets = Vec::new();
    for id in lexicon.synsets(Some(args.word.as_str()), args.pos.map(Into::into)) {
        synsets.push(SynsetSummary::from(lexicon.synset(id)?));
    }

    output_result(
        &format!("Synsets containing '{}'", args.word),
        &LookupResult {
            word: args.word.clone(),
            synsets,
        },
        cli_args,
    )
}

/// Print a synset and its relations.
fn show_synset(args: &ShowArgs, config: LexiconConfig, cli_args: &LexigraphArgs) -> Result<()> {
    let lexicon = open_lexicon(&args.input.lexicon, args.input.format(), config)?;
    let synset = lexicon.synset(&args.id)?;

    let outbound = lexicon
        .outbound_relations(&args.id)?
        .into_iter()
        .map(|(target, label)| RelationTriple::new(&args.id, label, target))
        .collect();
    let inbound = lexicon
        .inbound_relations(&args.id)?
        .into_iter()
        .map(|(source, label)| RelationTriple::new(source, label, &args.id))
        .collect();

    output_result(
        "",
        &ShowResult {
            synset: synset.clone(),
            outbound,
            inbound,
            description: lexicon.describe(&args.id)?,
        },
        cli_args,
    )
}

/// Shortest path between two synsets.
fn shortest_path(args: &PathArgs, config: LexiconConfig, cli_args: &LexigraphArgs) -> Result<()> {
    let lexicon = open_lexicon(&args.input.lexicon, args.input.format(), config)?;

    let labels: Vec<&str> = args.relations.iter().map(String::as_str).collect();
    let allowed = (!labels.is_empty()).then_some(labels.as_slice());
    let path = lexicon.shortest_path(&args.from, &args.to, allowed)?;

    output_result(
        &format!("Shortest path from '{}' to '{}'", args.from, args.to),
        &PathResult {
            from: args.from.clone(),
            to: args.to.clone(),
            path: path.into_iter().map(String::from).collect(),
        },
        cli_args,
    )
}

/// Lowest common ancestor of two synsets.
fn common_ancestor(
    args: &AncestorArgs,
    config: LexiconConfig,
    cli_args: &LexigraphArgs,
) -> Result<()> {
    let lexicon = open_lexicon(&args.input.lexicon, args.input.format(), config)?;
    let relation = args
        .relation
        .clone()
        .unwrap_or_else(|| lexicon.config().root_relation.clone());

    let ancestor = lexicon
        .lowest_common_ancestor(&args.first, &args.second, Some(relation.as_str()))?
        .map(String::from);

    output_result(
        &format!("Lowest common ancestor of '{}' and '{}'", args.first, args.second),
        &AncestorResult {
            first: args.first.clone(),
            second: args.second.clone(),
            relation,
            ancestor,
        },
        cli_args,
    )
}

/// Breadth-first walk from a synset.
fn walk(args: &WalkArgs, config: LexiconConfig, cli_args: &LexigraphArgs) -> Result<()> {
    let lexicon = open_lexicon(&args.input.lexicon, args.input.format(), config)?;

    let mut walk = lexicon.breadth_first_walk(&args.id)?;
    let steps: Vec<WalkEntry> = walk
        .by_ref()
        .take(args.limit)
        .map(|step| WalkEntry {
            synset_id: step.synset_id.to_string(),
            relation: step.relation.to_string(),
            predecessor: step.predecessor.to_string(),
        })
        .collect();
    let truncated = walk.next().is_some();

    output_result(
        &format!("Breadth-first walk from '{}'", args.id),
        &WalkResult {
            start: args.id.clone(),
            steps,
            truncated,
        },
        cli_args,
    )
}

/// Convert a lexicon between formats.
fn convert(args: &ConvertArgs, config: LexiconConfig, cli_args: &LexigraphArgs) -> Result<()> {
    let lexicon = open_lexicon(&args.input.lexicon, args.input.format(), config)?;
    let format = args.output_format();

    info!(
        "Converting {} ({:?}) to {} ({:?})",
        args.input.lexicon.display(),
        args.input.format(),
        args.output.display(),
        format
    );
    lexicon.save(&args.output, format)?;

    let stats = lexicon.stats();
    output_result(
        "Conversion finished",
        &ConversionResult {
            input: args.input.lexicon.display().to_string(),
            output: args.output.display().to_string(),
            synsets: stats.synsets,
            relations: stats.relations,
            output_bytes: fs::metadata(&args.output)?.len(),
        },
        cli_args,
    )
}

/// Compare two lexicons.
fn diff(args: &DiffArgs, config: LexiconConfig, cli_args: &LexigraphArgs) -> Result<()> {
    let base = open_lexicon(&args.base, PersistFormat::from_path(&args.base), config.clone())?;
    let other = open_lexicon(&args.other, PersistFormat::from_path(&args.other), config)?;

    output_result(
        &format!(
            "Differences of {} relative to {}",
            args.other.display(),
            args.base.display()
        ),
        &DiffResult {
            base: args.base.display().to_string(),
            other: args.other.display().to_string(),
            diff: algebra::difference(&base, &other),
        },
        cli_args,
    )
}
