//! Secondary index from literal words to the synsets containing them.
//!
//! Per-word id lists are ordered by (registry order, literal order within
//! the synset) after a rebuild. Incremental appends keep that order only
//! while synsets are registered with their final literals.

use ahash::AHashMap;

use crate::synset::Synset;

#[derive(Debug, Clone, Default)]
pub struct LiteralIndex {
    entries: AHashMap<String, Vec<String>>,
}

impl LiteralIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synset ids containing `word`; empty when the word is unknown.
    pub fn lookup(&self, word: &str) -> &[String] {
        self.entries
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append `id` to the list for `word`.
    pub fn append(&mut self, word: &str, id: &str) {
        self.entries
            .entry(word.to_string())
            .or_default()
            .push(id.to_string());
    }

    /// Index every literal of a synset.
    pub fn index_synset(&mut self, synset: &Synset) {
        for word in synset.words() {
            self.append(word, synset.id());
        }
    }

    /// Drop `id` from the list for `word`, removing the word once its list is empty.
    pub fn remove(&mut self, word: &str, id: &str) {
        if let Some(ids) = self.entries.get_mut(word) {
            ids.retain(|existing| existing != id);
            if ids.is_empty() {
                self.entries.remove(word);
            }
        }
    }

    /// Clear and rebuild from synsets, in the order given.
    pub fn reindex<'a, I>(&mut self, synsets: I)
    where
        I: IntoIterator<Item = &'a Synset>,
    {
        self.entries.clear();
        for synset in synsets {
            self.index_synset(synset);
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
