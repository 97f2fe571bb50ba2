//! The lexicon aggregate: synsets, literal index, relation types and relation graph.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use ahash::AHashSet;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result, ensure_id};
use crate::graph::{GraphStore, RelationTriple, RelationTypeRegistry};
use crate::lexicon::config::{LexiconConfig, LexiconSource, PersistFormat};
use crate::lexicon::literal_index::LiteralIndex;
use crate::lexicon::registry::SynsetRegistry;
use crate::lexicon::snapshot::LexiconSnapshot;
use crate::storage;
use crate::synset::{Pos, Synset};
use crate::traversal::{self, BreadthFirstWalk};

/// Summary counts for a lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconStats {
    pub synsets: usize,
    /// Distinct literal words.
    pub literals: usize,
    pub relation_types: usize,
    pub relations: usize,
    /// Synset count per part of speech; synsets without a POS are not counted.
    pub synsets_by_pos: BTreeMap<String, usize>,
}

/// A lexical-semantic graph of synsets connected by typed relations.
///
/// The lexicon owns its synsets. Every operation taking a synset id rejects
/// empty ids and fails with [`LexiconError::NotInLexicon`] for unknown ones.
///
/// # Examples
///
/// ```
/// use lexigraph::lexicon::Lexicon;
/// use lexigraph::synset::{Pos, Synset};
///
/// let mut lexicon = Lexicon::new();
/// lexicon.add_relation_type("hypernym").unwrap();
/// lexicon
///     .add_synset(Synset::new("s1").unwrap().with_pos(Pos::Noun).with_literals(["stejar"]).unwrap())
///     .unwrap();
/// lexicon
///     .add_synset(Synset::new("s2").unwrap().with_pos(Pos::Noun).with_literals(["arbore"]).unwrap())
///     .unwrap();
/// lexicon.add_relation("s1", "s2", "hypernym").unwrap();
///
/// assert_eq!(lexicon.synsets(Some("stejar"), None), vec!["s1"]);
/// assert_eq!(lexicon.root_path("s1", None).unwrap(), vec!["s1", "s2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    config: LexiconConfig,
    synsets: SynsetRegistry,
    literal_index: LiteralIndex,
    relation_types: RelationTypeRegistry,
    graph: GraphStore,
}

impl Lexicon {
    /// Create an empty lexicon with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty lexicon with the given configuration.
    pub fn with_config(config: LexiconConfig) -> Self {
        Lexicon {
            config,
            ..Default::default()
        }
    }

    /// Open a lexicon from an explicit file or from the configured default resource.
    pub fn open(source: &LexiconSource, config: LexiconConfig) -> Result<Self> {
        let (path, format) = config.resolve(source)?;
        let mut lexicon = Lexicon::with_config(config);
        lexicon.load(&path, format)?;
        Ok(lexicon)
    }

    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    /// Replace the entire state with the contents of a file.
    ///
    /// The current state is kept if loading fails.
    pub fn load<P: AsRef<Path>>(&mut self, path: P, format: PersistFormat) -> Result<()> {
        let path = path.as_ref();
        let snapshot = storage::read_snapshot(path, format, &self.config)?;
        *self = Lexicon::from_snapshot(snapshot, self.config.clone())?;

        info!(
            "Loaded {} synsets and {} relations from {}",
            self.synsets.len(),
            self.graph.edge_count(),
            path.display()
        );
        Ok(())
    }

    /// Write the current state to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: PersistFormat) -> Result<()> {
        let path = path.as_ref();
        storage::write_snapshot(path, format, &self.snapshot())?;

        info!(
            "Saved {} synsets and {} relations to {}",
            self.synsets.len(),
            self.graph.edge_count(),
            path.display()
        );
        Ok(())
    }

    /// Copy the full state into a serializable snapshot.
    pub fn snapshot(&self) -> LexiconSnapshot {
        LexiconSnapshot {
            synsets: self.synsets.iter().cloned().collect(),
            relation_types: self
                .relation_types
                .sorted()
                .into_iter()
                .map(String::from)
                .collect(),
            relations: self
                .graph
                .edges()
                .map(|(source, edge)| RelationTriple::new(source, &edge.label, &edge.peer))
                .collect(),
        }
    }

    /// Rebuild a lexicon from a snapshot.
    ///
    /// Relations are written straight into the graph: labels they use are
    /// registered on the fly and parallel labeled edges are kept. Targets
    /// without a synset are tolerated and reported.
    pub fn from_snapshot(snapshot: LexiconSnapshot, config: LexiconConfig) -> Result<Self> {
        let mut lexicon = Lexicon::with_config(config);

        for label in &snapshot.relation_types {
            lexicon.relation_types.observe(label);
        }

        for synset in snapshot.synsets {
            synset.validate().map_err(|e| {
                LexiconError::malformed(format!("synset '{}' is invalid: {e}", synset.id()))
            })?;
            if lexicon.synsets.contains(synset.id()) {
                return Err(LexiconError::malformed(format!(
                    "synset id '{}' appears more than once",
                    synset.id()
                )));
            }
            lexicon.graph.add_node(synset.id());
            lexicon.synsets.insert(synset)?;
        }

        for relation in &snapshot.relations {
            if relation.source.is_empty() || relation.target.is_empty() {
                return Err(LexiconError::malformed(format!(
                    "relation '{}' has an empty endpoint",
                    relation.label
                )));
            }
            lexicon.relation_types.observe(&relation.label);
            lexicon
                .graph
                .add_edge(&relation.source, &relation.target, &relation.label);
        }

        lexicon.reindex_literals();

        let dangling = lexicon
            .graph
            .nodes()
            .filter(|id| !lexicon.synsets.contains(id))
            .count();
        if dangling > 0 {
            warn!("{dangling} relation endpoints do not correspond to any synset");
        }

        Ok(lexicon)
    }

    /// Synset ids, optionally filtered by literal and then by part of speech.
    ///
    /// Without a literal, ids come in registration order; with one, in
    /// literal index order. An unknown literal yields an empty list.
    pub fn synsets(&self, literal: Option<&str>, pos: Option<Pos>) -> Vec<&str> {
        let ids: Vec<&str> = match literal {
            Some(word) => self
                .literal_index
                .lookup(word)
                .iter()
                .map(String::as_str)
                .collect(),
            None => self.synsets.ids().collect(),
        };

        match pos {
            Some(pos) => ids
                .into_iter()
                .filter(|id| self.synsets.get(id).and_then(Synset::pos) == Some(pos))
                .collect(),
            None => ids,
        }
    }

    /// Look up a synset by id.
    pub fn synset(&self, id: &str) -> Result<&Synset> {
        ensure_id(id)?;
        self.synsets
            .get(id)
            .ok_or_else(|| LexiconError::not_in_lexicon(id))
    }

    /// Mutable access to a synset.
    ///
    /// Literal edits made through this reference bypass the literal index;
    /// call [`Lexicon::reindex_literals`] afterwards.
    pub fn synset_mut(&mut self, id: &str) -> Result<&mut Synset> {
        ensure_id(id)?;
        self.synsets
            .get_mut(id)
            .ok_or_else(|| LexiconError::not_in_lexicon(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.synsets.contains(id)
    }

    /// Whether a synset with the same id and identical content is registered.
    pub fn synset_exists(&self, synset: &Synset) -> bool {
        self.synsets
            .get(synset.id())
            .is_some_and(|current| current == synset)
    }

    /// Number of synsets.
    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    /// Register a synset and index its literals.
    pub fn add_synset(&mut self, synset: Synset) -> Result<()> {
        if self.synsets.contains(synset.id()) {
            return Err(LexiconError::already_in_lexicon(synset.id()));
        }
        self.graph.add_node(synset.id());
        self.literal_index.index_synset(&synset);
        self.synsets.insert(synset)
    }

    /// Add a literal to a registered synset and index it.
    pub fn add_literal(&mut self, id: &str, word: &str, sense: &str) -> Result<()> {
        self.synset_mut(id)?.add_literal(word, sense)?;
        self.literal_index.append(word, id);
        Ok(())
    }

    /// Remove a literal from a registered synset and unindex it.
    pub fn remove_literal(&mut self, id: &str, word: &str) -> Result<()> {
        self.synset_mut(id)?.remove_literal(word)?;
        self.literal_index.remove(word, id);
        Ok(())
    }

    /// Rebuild the literal index from the current literals of every synset.
    pub fn reindex_literals(&mut self) {
        self.literal_index.reindex(self.synsets.iter());
    }

    /// First free id of the form `prefix + 8-digit number + suffix`.
    ///
    /// Numbers are compared as decimal text, so ids of any length are
    /// accepted. Fails if an existing id carries the prefix and suffix
    /// around a non-numeric middle.
    pub fn generate_id(&self, prefix: &str, suffix: &str) -> Result<String> {
        let mut maximum: Option<&str> = None;

        for id in self.synsets.ids() {
            let Some(middle) = id
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix))
            else {
                continue;
            };

            if middle.is_empty() || !middle.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LexiconError::malformed_synset_id(
                    id,
                    format!("'{middle}' is not a decimal number"),
                ));
            }

            let digits = middle.trim_start_matches('0');
            if maximum.is_none_or(|current| (digits.len(), digits) > (current.len(), current)) {
                maximum = Some(digits);
            }
        }

        let next = maximum.map_or_else(|| "1".to_string(), increment_decimal);
        Ok(format!("{prefix}{next:0>8}{suffix}"))
    }

    /// [`Lexicon::generate_id`] with the configured prefix and suffix.
    pub fn next_id(&self) -> Result<String> {
        self.generate_id(&self.config.id_prefix, &self.config.id_suffix)
    }

    /// Registered relation labels, in no particular order.
    pub fn relation_types(&self) -> impl Iterator<Item = &str> {
        self.relation_types.iter()
    }

    pub fn relation_type_registry(&self) -> &RelationTypeRegistry {
        &self.relation_types
    }

    pub fn add_relation_type(&mut self, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(LexiconError::invalid_argument(
                "relation type must be a non-empty string",
            ));
        }
        self.relation_types.add(label)
    }

    /// The underlying relation graph.
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Add a relation `source -> target`.
    ///
    /// At most one relation of any label may exist per ordered pair.
    pub fn add_relation(&mut self, source: &str, target: &str, label: &str) -> Result<()> {
        self.ensure_synset(source)?;
        self.ensure_synset(target)?;
        self.relation_types.ensure(label)?;

        if self.graph.has_edge(source, target) {
            return Err(LexiconError::relation_already_exists(source, target));
        }
        self.graph.add_edge(source, target, label);
        Ok(())
    }

    /// Remove the relation `source -> target`, whatever its label.
    pub fn remove_relation(&mut self, source: &str, target: &str) -> Result<()> {
        self.ensure_synset(source)?;
        self.ensure_synset(target)?;
        self.graph.remove_edge(source, target)?;
        Ok(())
    }

    /// (target id, label) pairs of relations leaving `id`.
    pub fn outbound_relations(&self, id: &str) -> Result<Vec<(&str, &str)>> {
        self.ensure_synset(id)?;
        Ok(self
            .graph
            .outbound(id)
            .iter()
            .map(|edge| (edge.peer.as_str(), edge.label.as_str()))
            .collect())
    }

    /// (source id, label) pairs of relations entering `id`.
    pub fn inbound_relations(&self, id: &str) -> Result<Vec<(&str, &str)>> {
        self.ensure_synset(id)?;
        Ok(self
            .graph
            .inbound(id)
            .iter()
            .map(|edge| (edge.peer.as_str(), edge.label.as_str()))
            .collect())
    }

    /// Outbound relations followed by inbound relations, without deduplication.
    pub fn relations(&self, id: &str) -> Result<Vec<(&str, &str)>> {
        let mut relations = self.outbound_relations(id)?;
        relations.extend(self.inbound_relations(id)?);
        Ok(relations)
    }

    /// Whether `source -> target` exists with exactly this label.
    pub fn relation_exists(&self, source: &str, target: &str, label: &str) -> Result<bool> {
        self.ensure_synset(source)?;
        self.ensure_synset(target)?;
        self.relation_types.ensure(label)?;
        Ok(self.graph.has_labeled_edge(source, target, label))
    }

    /// Synsets reachable through one outbound relation, optionally of a single label.
    pub fn adjacent_synsets(&self, id: &str, label: Option<&str>) -> Result<Vec<&Synset>> {
        self.ensure_synset(id)?;
        if let Some(label) = label {
            self.relation_types.ensure(label)?;
        }

        Ok(self
            .graph
            .outbound(id)
            .iter()
            .filter(|edge| label.is_none_or(|label| edge.label == label))
            .filter_map(|edge| self.synsets.get(&edge.peer))
            .collect())
    }

    /// Chain from `id` to the root of the tree formed by `label`
    /// (the configured root relation when `None`).
    ///
    /// Each hop follows the first matching outbound relation; other parents
    /// with the same label are ignored.
    pub fn root_path(&self, id: &str, label: Option<&str>) -> Result<Vec<&str>> {
        let start = self.synset(id)?.id();
        let label = label.unwrap_or(self.config.root_relation.as_str());
        self.relation_types.ensure(label)?;
        Ok(traversal::root_path(&self.graph, start, label))
    }

    /// Nearest ancestor of `first` (in root-path order) that is also on the
    /// root path of `second`. `None` when the paths never meet.
    pub fn lowest_common_ancestor(
        &self,
        first: &str,
        second: &str,
        label: Option<&str>,
    ) -> Result<Option<&str>> {
        let first_path = self.root_path(first, label)?;
        let second_path = self.root_path(second, label)?;
        Ok(traversal::lowest_common_ancestor(&first_path, &second_path))
    }

    /// Lazy breadth-first walk over outbound relations starting at `id`.
    ///
    /// The start synset itself is not yielded.
    pub fn breadth_first_walk(&self, id: &str) -> Result<BreadthFirstWalk<'_>> {
        let start = self.synset(id)?.id();
        Ok(BreadthFirstWalk::new(&self.graph, start))
    }

    /// Shortest path `source ..= target`, optionally using only the given labels.
    ///
    /// Fails with [`LexiconError::PathNotFound`] when `target` is unreachable.
    pub fn shortest_path(
        &self,
        source: &str,
        target: &str,
        allowed_labels: Option<&[&str]>,
    ) -> Result<Vec<&str>> {
        let start = self.synset(source)?.id();
        self.ensure_synset(target)?;

        let allowed: Option<AHashSet<&str>> = match allowed_labels {
            Some(labels) => {
                for label in labels {
                    self.relation_types.ensure(label)?;
                }
                Some(labels.iter().copied().collect())
            }
            None => None,
        };

        traversal::shortest_path(&self.graph, start, target, allowed.as_ref())
            .ok_or_else(|| LexiconError::path_not_found(source, target))
    }

    /// Multi-line description of a synset and its relations.
    pub fn describe(&self, id: &str) -> Result<String> {
        let synset = self.synset(id)?;
        let outbound = self.outbound_relations(id)?;
        let inbound = self.inbound_relations(id)?;

        let mut out = String::new();
        write_description(&mut out, synset, &outbound, &inbound)
            .map_err(|e| LexiconError::serialization(format!("describe '{id}': {e}")))?;
        Ok(out)
    }

    pub fn stats(&self) -> LexiconStats {
        let mut synsets_by_pos = BTreeMap::new();
        for synset in self.synsets.iter() {
            if let Some(pos) = synset.pos() {
                *synsets_by_pos.entry(pos.name().to_string()).or_insert(0) += 1;
            }
        }

        LexiconStats {
            synsets: self.synsets.len(),
            literals: self.literal_index.len(),
            relation_types: self.relation_types.len(),
            relations: self.graph.edge_count(),
            synsets_by_pos,
        }
    }

    fn ensure_synset(&self, id: &str) -> Result<()> {
        ensure_id(id)?;
        if self.synsets.contains(id) {
            Ok(())
        } else {
            Err(LexiconError::not_in_lexicon(id))
        }
    }
}

/// Add one to a string of ASCII digits without leading zeros.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return bytes.into_iter().map(char::from).collect();
        }
    }
    bytes.insert(0, b'1');
    bytes.into_iter().map(char::from).collect()
}

fn write_description(
    out: &mut String,
    synset: &Synset,
    outbound: &[(&str, &str)],
    inbound: &[(&str, &str)],
) -> std::fmt::Result {
    writeln!(out, "Synset:")?;
    writeln!(out, "    id={}", synset.id())?;
    writeln!(out, "    pos={}", display_opt(synset.pos().map(Pos::name)))?;
    writeln!(out, "    nonlexicalized={}", display_opt(synset.nonlexicalized()))?;
    writeln!(out, "    stamp={}", display_opt(synset.stamp()))?;
    writeln!(out, "    domain={}", display_opt(synset.domain()))?;
    writeln!(out, "    definition={}", display_opt(synset.definition()))?;
    writeln!(out, "    sumo={}", display_opt(synset.sumo()))?;
    writeln!(
        out,
        "    sumo_type={}",
        display_opt(synset.sumo_type().map(|t| t.name()))
    )?;
    writeln!(out, "    sentiment={}", display_opt(synset.sentiment()))?;

    writeln!(out, "    Literals:")?;
    for literal in synset.literals() {
        writeln!(out, "        {} - {}", literal.word, literal.sense)?;
    }
    writeln!(out, "    Outbound relations:")?;
    for (target, label) in outbound {
        writeln!(out, "        {target} - {label}")?;
    }
    writeln!(out, "    Inbound relations:")?;
    for (source, label) in inbound {
        writeln!(out, "        {source} - {label}")?;
    }
    Ok(())
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
