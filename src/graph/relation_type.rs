//! Registry of relation labels allowed on edges.

use ahash::AHashSet;

use crate::error::{LexiconError, Result};

/// The set of known relation-type labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationTypeRegistry {
    labels: AHashSet<String>,
}

impl RelationTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new label.
    pub fn add(&mut self, label: &str) -> Result<()> {
        if self.labels.contains(label) {
            return Err(LexiconError::duplicate_relation_type(label));
        }
        self.labels.insert(label.to_string());
        Ok(())
    }

    /// Register a label observed during bulk loading. Returns `false` if it was known.
    pub(crate) fn observe(&mut self, label: &str) -> bool {
        if self.labels.contains(label) {
            return false;
        }
        self.labels.insert(label.to_string())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Fail with `InvalidRelationType` unless the label is registered.
    pub fn ensure(&self, label: &str) -> Result<()> {
        if self.contains(label) {
            Ok(())
        } else {
            Err(LexiconError::invalid_relation_type(label))
        }
    }

    /// Labels in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Labels sorted lexicographically, for stable output.
    pub fn sorted(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.iter().collect();
        labels.sort_unstable();
        labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
