//! Command line argument parsing for the lexigraph CLI using clap.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::lexicon::PersistFormat;
use crate::synset::Pos;

/// lexigraph - query and convert lexical-semantic graphs
#[derive(Parser, Debug, Clone)]
#[command(name = "lexigraph")]
#[command(about = "Query and convert WordNet-style lexical-semantic graphs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexigraphArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Lexicon configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true, env = "LEXIGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexigraphArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show lexicon statistics
    Stats(StatsArgs),

    /// Find the synsets containing a word
    Lookup(LookupArgs),

    /// Print one synset with its relations
    Show(ShowArgs),

    /// Shortest relation path between two synsets
    Path(PathArgs),

    /// Lowest common ancestor of two synsets
    Ancestor(AncestorArgs),

    /// Breadth-first walk from a synset
    Walk(WalkArgs),

    /// Convert a lexicon between XML and binary
    Convert(ConvertArgs),

    /// Show what a second lexicon adds or changes relative to a first
    Diff(DiffArgs),
}

/// Lexicon file shared by most commands
#[derive(Args, Debug, Clone)]
pub struct LexiconInput {
    /// Path to the lexicon file
    #[arg(value_name = "LEXICON")]
    pub lexicon: PathBuf,

    /// File format (guessed from the extension when omitted)
    #[arg(long, value_name = "FORMAT")]
    pub input_format: Option<FileFormat>,
}

impl LexiconInput {
    pub fn format(&self) -> PersistFormat {
        resolve_format(self.input_format, &self.lexicon)
    }
}

/// Arguments for lexicon statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: LexiconInput,
}

/// Arguments for literal lookup
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    #[command(flatten)]
    pub input: LexiconInput,

    /// Word to look up
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Only keep synsets with this part of speech
    #[arg(short, long)]
    pub pos: Option<PosArg>,
}

/// Arguments for showing a synset
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: LexiconInput,

    /// Synset id
    #[arg(value_name = "SYNSET_ID")]
    pub id: String,
}

/// Arguments for shortest path queries
#[derive(Parser, Debug, Clone)]
pub struct PathArgs {
    #[command(flatten)]
    pub input: LexiconInput,

    /// Source synset id
    #[arg(value_name = "FROM")]
    pub from: String,

    /// Target synset id
    #[arg(value_name = "TO")]
    pub to: String,

    /// Only follow these relation types (comma-separated)
    #[arg(short, long = "relation", value_delimiter = ',')]
    pub relations: Vec<String>,
}

/// Arguments for common ancestor queries
#[derive(Parser, Debug, Clone)]
pub struct AncestorArgs {
    #[command(flatten)]
    pub input: LexiconInput,

    /// First synset id
    #[arg(value_name = "FIRST")]
    pub first: String,

    /// Second synset id
    #[arg(value_name = "SECOND")]
    pub second: String,

    /// Relation forming the hierarchy (defaults to the configured root relation)
    #[arg(short, long)]
    pub relation: Option<String>,
}

/// Arguments for breadth-first walks
#[derive(Parser, Debug, Clone)]
pub struct WalkArgs {
    #[command(flatten)]
    pub input: LexiconInput,

    /// Start synset id
    #[arg(value_name = "SYNSET_ID")]
    pub id: String,

    /// Maximum number of synsets to print
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for format conversion
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: LexiconInput,

    /// Destination file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Destination format (guessed from the extension when omitted)
    #[arg(long, value_name = "FORMAT")]
    pub to: Option<FileFormat>,
}

impl ConvertArgs {
    pub fn output_format(&self) -> PersistFormat {
        resolve_format(self.to, &self.output)
    }
}

/// Arguments for lexicon comparison
#[derive(Parser, Debug, Clone)]
pub struct DiffArgs {
    /// Lexicon compared against
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Lexicon whose differences are reported
    #[arg(value_name = "OTHER")]
    pub other: PathBuf,
}

/// Lexicon file formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Tagged XML
    Xml,
    /// Framed binary snapshot
    Binary,
}

impl From<FileFormat> for PersistFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Xml => PersistFormat::Xml,
            FileFormat::Binary => PersistFormat::Binary,
        }
    }
}

/// Parts of speech accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosArg {
    Noun,
    Verb,
    Adverb,
    Adjective,
}

impl From<PosArg> for Pos {
    fn from(pos: PosArg) -> Self {
        match pos {
            PosArg::Noun => Pos::Noun,
            PosArg::Verb => Pos::Verb,
            PosArg::Adverb => Pos::Adverb,
            PosArg::Adjective => Pos::Adjective,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

fn resolve_format(explicit: Option<FileFormat>, path: &Path) -> PersistFormat {
    explicit.map_or_else(|| PersistFormat::from_path(path), PersistFormat::from)
}
