//! Insertion-ordered synset registry.

use ahash::AHashMap;

use crate::error::{LexiconError, Result};
use crate::synset::Synset;

/// Maps synset ids to synsets and remembers registration order.
#[derive(Debug, Clone, Default)]
pub struct SynsetRegistry {
    synsets: AHashMap<String, Synset>,
    order: Vec<String>,
}

impl SynsetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synset under its id.
    pub fn insert(&mut self, synset: Synset) -> Result<()> {
        if self.synsets.contains_key(synset.id()) {
            return Err(LexiconError::already_in_lexicon(synset.id()));
        }
        self.order.push(synset.id().to_string());
        self.synsets.insert(synset.id().to_string(), synset);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Synset> {
        self.synsets.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Synset> {
        self.synsets.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.synsets.contains_key(id)
    }

    /// Ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Synsets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Synset> {
        self.order.iter().filter_map(|id| self.synsets.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
