//! Flat, serializable view of a lexicon's full state.

use serde::{Deserialize, Serialize};

use crate::graph::RelationTriple;
use crate::synset::Synset;

/// Everything needed to rebuild an equivalent lexicon.
///
/// The literal index is not stored; it is derived from the synsets on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconSnapshot {
    /// Synsets in registry order.
    pub synsets: Vec<Synset>,
    /// Registered relation labels, sorted.
    pub relation_types: Vec<String>,
    /// Edges grouped by source in graph node order.
    pub relations: Vec<RelationTriple>,
}
