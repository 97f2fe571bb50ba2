//! Set operations between two lexicons.
//!
//! Every operation reads its inputs and builds a new, independently owned
//! lexicon. Conflicts while combining (duplicate ids, duplicate relation
//! types, rejected relations) are skipped and logged at debug level; this
//! leniency exists only here.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::graph::RelationTriple;
use crate::lexicon::Lexicon;

/// Differences of one lexicon relative to another.
///
/// A field is `None` when nothing differs, never an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconDiff {
    pub synsets: Option<BTreeSet<String>>,
    pub relations: Option<BTreeSet<RelationTriple>>,
}

impl LexiconDiff {
    /// Whether the two lexicons had no differences at all.
    pub fn is_empty(&self) -> bool {
        self.synsets.is_none() && self.relations.is_none()
    }
}

/// Synsets of `a` whose id also exists in `b`, the relation types both
/// register, and the relations of `a` that still fit.
///
/// Synset content is taken from `a` and is not compared with `b`.
pub fn intersection(a: &Lexicon, b: &Lexicon) -> Lexicon {
    let mut result = Lexicon::with_config(a.config().clone());

    for label in a.relation_types() {
        if b.relation_type_registry().contains(label) {
            if let Err(e) = result.add_relation_type(label) {
                debug!("intersection: skipping relation type '{label}': {e}");
            }
        }
    }

    for id in a.synsets(None, None) {
        if !b.contains(id) {
            continue;
        }
        if let Ok(synset) = a.synset(id) {
            if let Err(e) = result.add_synset(synset.clone()) {
                debug!("intersection: skipping synset '{id}': {e}");
            }
        }
    }

    copy_relations(a, &mut result, "intersection");
    result
}

/// Everything in `b`, plus whatever from `a` does not conflict with it.
///
/// `b` wins every conflict: an `a` synset whose id is taken, or an `a`
/// relation between a pair already linked, is dropped.
pub fn merge(a: &Lexicon, b: &Lexicon) -> Lexicon {
    let mut result = b.clone();

    for label in a.relation_types() {
        if let Err(e) = result.add_relation_type(label) {
            debug!("merge: skipping relation type '{label}': {e}");
        }
    }

    for id in a.synsets(None, None) {
        if let Ok(synset) = a.synset(id) {
            if let Err(e) = result.add_synset(synset.clone()) {
                debug!("merge: skipping synset '{id}': {e}");
            }
        }
    }

    copy_relations(a, &mut result, "merge");
    result
}

/// What `b` has that `a` lacks or holds differently.
///
/// A synset of `b` differs when `a` has no synset with its id or has a
/// structurally different one. A relation of `b` differs when `a` has no
/// relation with the same source, label and target.
pub fn difference(a: &Lexicon, b: &Lexicon) -> LexiconDiff {
    let synsets: BTreeSet<String> = b
        .synsets(None, None)
        .into_iter()
        .filter(|id| match (a.synset(id), b.synset(id)) {
            (Ok(ours), Ok(theirs)) => ours != theirs,
            _ => true,
        })
        .map(String::from)
        .collect();

    let relations: BTreeSet<RelationTriple> = b
        .graph()
        .edges()
        .filter(|(source, edge)| !a.graph().has_labeled_edge(source, &edge.peer, &edge.label))
        .map(|(source, edge)| RelationTriple::new(source, &edge.label, &edge.peer))
        .collect();

    LexiconDiff {
        synsets: (!synsets.is_empty()).then_some(synsets),
        relations: (!relations.is_empty()).then_some(relations),
    }
}

fn copy_relations(from: &Lexicon, into: &mut Lexicon, operation: &str) {
    for (source, edge) in from.graph().edges() {
        if let Err(e) = into.add_relation(source, &edge.peer, &edge.label) {
            debug!(
                "{operation}: skipping relation {source} -[{}]-> {}: {e}",
                edge.label, edge.peer
            );
        }
    }
}
