//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;

use crate::algebra::LexiconDiff;
use crate::cli::args::{LexigraphArgs, OutputFormat};
use crate::error::Result;
use crate::graph::RelationTriple;
use crate::lexicon::LexiconStats;
use crate::synset::Synset;

/// A command result that can also be printed for humans.
pub trait HumanOutput: Serialize {
    /// Write the human-readable form of the result.
    fn write_human(&self, out: &mut dyn Write) -> Result<()>;
}

/// One synset in a listing.
#[derive(Debug, Serialize)]
pub struct SynsetSummary {
    pub id: String,
    pub pos: Option<String>,
    pub literals: Vec<String>,
    pub definition: Option<String>,
}

impl From<&Synset> for SynsetSummary {
    fn from(synset: &Synset) -> Self {
        SynsetSummary {
            id: synset.id().to_string(),
            pos: synset.pos().map(|pos| pos.name().to_string()),
            literals: synset.words().map(String::from).collect(),
            definition: synset.definition().map(String::from),
        }
    }
}

/// Result of a literal lookup.
#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub word: String,
    pub synsets: Vec<SynsetSummary>,
}

/// A synset with its relations.
#[derive(Debug, Serialize)]
pub struct ShowResult {
    pub synset: Synset,
    pub outbound: Vec<RelationTriple>,
    pub inbound: Vec<RelationTriple>,
    #[serde(skip)]
    pub description: String,
}

/// Result of a shortest path query.
#[derive(Debug, Serialize)]
pub struct PathResult {
    pub from: String,
    pub to: String,
    pub path: Vec<String>,
}

/// Result of a common ancestor query.
#[derive(Debug, Serialize)]
pub struct AncestorResult {
    pub first: String,
    pub second: String,
    pub relation: String,
    pub ancestor: Option<String>,
}

/// One step of a breadth-first walk.
#[derive(Debug, Serialize)]
pub struct WalkEntry {
    pub synset_id: String,
    pub relation: String,
    pub predecessor: String,
}

/// Result of a breadth-first walk.
#[derive(Debug, Serialize)]
pub struct WalkResult {
    pub start: String,
    pub steps: Vec<WalkEntry>,
    pub truncated: bool,
}

/// Result of a format conversion.
#[derive(Debug, Serialize)]
pub struct ConversionResult {
    pub input: String,
    pub output: String,
    pub synsets: usize,
    pub relations: usize,
    pub output_bytes: u64,
}

/// Result of a lexicon comparison.
#[derive(Debug, Serialize)]
pub struct DiffResult {
    pub base: String,
    pub other: String,
    #[serde(flatten)]
    pub diff: LexiconDiff,
}

impl HumanOutput for LexiconStats {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Lexicon Statistics:")?;
        writeln!(out, "═══════════════════")?;
        writeln!(out, "Synsets: {}", self.synsets)?;
        writeln!(out, "Literals: {}", self.literals)?;
        writeln!(out, "Relation types: {}", self.relation_types)?;
        writeln!(out, "Relations: {}", self.relations)?;
        if !self.synsets_by_pos.is_empty() {
            writeln!(out)?;
            writeln!(out, "Synsets by part of speech:")?;
            for (pos, count) in &self.synsets_by_pos {
                writeln!(out, "  {pos}: {count}")?;
            }
        }
        Ok(())
    }
}

impl HumanOutput for LookupResult {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        if self.synsets.is_empty() {
            writeln!(out, "No synsets contain '{}'", self.word)?;
            return Ok(());
        }
        for summary in &self.synsets {
            writeln!(
                out,
                "{} [{}] {}",
                summary.id,
                summary.pos.as_deref().unwrap_or("-"),
                summary.literals.join(", ")
            )?;
            if let Some(definition) = &summary.definition {
                writeln!(out, "    {definition}")?;
            }
        }
        Ok(())
    }
}

impl HumanOutput for ShowResult {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        write!(out, "{}", self.description)?;
        Ok(())
    }
}

impl HumanOutput for PathResult {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", self.path.join(" -> "))?;
        writeln!(out, "Length: {}", self.path.len().saturating_sub(1))?;
        Ok(())
    }
}

impl HumanOutput for AncestorResult {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        match &self.ancestor {
            Some(ancestor) => writeln!(out, "{ancestor}")?,
            None => writeln!(
                out,
                "'{}' and '{}' share no ancestor through '{}'",
                self.first, self.second, self.relation
            )?,
        }
        Ok(())
    }
}

impl HumanOutput for WalkResult {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(
                out,
                "{:>4}. {} <-[{}]- {}",
                i + 1,
                step.synset_id,
                step.relation,
                step.predecessor
            )?;
        }
        if self.truncated {
            writeln!(out, "... (limit reached)")?;
        }
        Ok(())
    }
}

impl HumanOutput for ConversionResult {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "{} -> {} ({} synsets, {} relations, {})",
            self.input,
            self.output,
            self.synsets,
            self.relations,
            format_bytes(self.output_bytes)
        )?;
        Ok(())
    }
}

impl HumanOutput for DiffResult {
    fn write_human(&self, out: &mut dyn Write) -> Result<()> {
        if self.diff.is_empty() {
            writeln!(out, "No differences")?;
            return Ok(());
        }
        if let Some(synsets) = &self.diff.synsets {
            writeln!(out, "Synsets ({}):", synsets.len())?;
            for id in synsets {
                writeln!(out, "  {id}")?;
            }
        }
        if let Some(relations) = &self.diff.relations {
            writeln!(out, "Relations ({}):", relations.len())?;
            for relation in relations {
                writeln!(
                    out,
                    "  {} -[{}]-> {}",
                    relation.source, relation.label, relation.target
                )?;
            }
        }
        Ok(())
    }
}

/// Print a result to stdout in the format selected on the command line.
pub fn output_result<T: HumanOutput>(message: &str, result: &T, args: &LexigraphArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result in the format selected on the command line.
pub fn write_result<T: HumanOutput>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &LexigraphArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 && !message.is_empty() {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
            Ok(())
        }
    }
}

/// Format bytes into human-readable format.
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}
