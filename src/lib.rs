//! # lexigraph
//!
//! An in-memory lexical-semantic graph store in the style of WordNet.
//!
//! ## Features
//!
//! - Synsets with literals, senses, SUMO mapping and sentiment scores
//! - Literal index for word lookup, optionally filtered by part of speech
//! - Typed, directed relations between synsets
//! - Breadth-first walks, shortest paths, root paths and common ancestors
//! - Intersection, merge and difference of whole lexicons
//! - XML and checksummed binary persistence

pub mod algebra;
pub mod cli;
pub mod error;
pub mod graph;
pub mod lexicon;
pub mod storage;
pub mod synset;
pub mod traversal;

pub mod prelude {
    pub use crate::algebra::{LexiconDiff, difference, intersection, merge};
    pub use crate::error::{LexiconError, Result};
    pub use crate::graph::RelationTriple;
    pub use crate::lexicon::{Lexicon, LexiconConfig, LexiconSource, PersistFormat};
    pub use crate::synset::{Literal, Pos, Sentiment, SumoType, Synset};
    pub use crate::traversal::WalkStep;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
