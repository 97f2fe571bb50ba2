//! The synset record: one word sense and the literals that express it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result, ensure_id};
use crate::synset::types::{Pos, Sentiment, SumoType};

/// A (word, sense) pair attached to a synset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub word: String,
    pub sense: String,
}

impl Literal {
    pub fn new<W: Into<String>, S: Into<String>>(word: W, sense: S) -> Self {
        Literal {
            word: word.into(),
            sense: sense.into(),
        }
    }
}

/// A node of the lexical graph representing one word sense.
///
/// Literals are kept in insertion order; the first one is conventionally the
/// primary sense. A word appears at most once per synset, and every literal
/// carries its own sense label, so words and senses cannot drift apart.
///
/// Equality is structural over every field and is what set algebra uses to
/// detect diverging copies of the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synset {
    id: String,
    pos: Option<Pos>,
    definition: Option<String>,
    domain: Option<String>,
    stamp: Option<String>,
    sumo: Option<String>,
    sumo_type: Option<SumoType>,
    sentiment: Option<Sentiment>,
    nonlexicalized: Option<bool>,
    literals: Vec<Literal>,
}

impl Synset {
    /// Create a detached synset with the given id and no other data.
    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into();
        ensure_id(&id)?;

        Ok(Synset {
            id,
            pos: None,
            definition: None,
            domain: None,
            stamp: None,
            sumo: None,
            sumo_type: None,
            sentiment: None,
            nonlexicalized: None,
            literals: Vec::new(),
        })
    }

    /// Set the part of speech (builder style).
    pub fn with_pos(mut self, pos: Pos) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Set the definition (builder style).
    pub fn with_definition<S: Into<String>>(mut self, definition: S) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Append literals with empty senses (builder style).
    pub fn with_literals<I, S>(mut self, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            self.add_literal(word, "")?;
        }
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Pos) {
        self.pos = Some(pos);
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn set_definition<S: Into<String>>(&mut self, definition: S) {
        self.definition = Some(definition.into());
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_domain<S: Into<String>>(&mut self, domain: S) {
        self.domain = Some(domain.into());
    }

    /// Provenance marker.
    pub fn stamp(&self) -> Option<&str> {
        self.stamp.as_deref()
    }

    /// Set or clear the provenance marker.
    pub fn set_stamp(&mut self, stamp: Option<String>) {
        self.stamp = stamp;
    }

    pub fn sumo(&self) -> Option<&str> {
        self.sumo.as_deref()
    }

    pub fn set_sumo<S: Into<String>>(&mut self, sumo: S) {
        self.sumo = Some(sumo.into());
    }

    pub fn sumo_type(&self) -> Option<SumoType> {
        self.sumo_type
    }

    pub fn set_sumo_type(&mut self, sumo_type: SumoType) {
        self.sumo_type = Some(sumo_type);
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }

    /// Set sentiment scores. [`Sentiment`] values are validated on construction.
    pub fn set_sentiment(&mut self, sentiment: Sentiment) {
        self.sentiment = Some(sentiment);
    }

    /// Set sentiment scores from a raw slice, validating its shape.
    pub fn set_sentiment_scores(&mut self, scores: &[f64]) -> Result<()> {
        self.sentiment = Some(Sentiment::try_from(scores)?);
        Ok(())
    }

    pub fn nonlexicalized(&self) -> Option<bool> {
        self.nonlexicalized
    }

    pub fn set_nonlexicalized(&mut self, nonlexicalized: bool) {
        self.nonlexicalized = Some(nonlexicalized);
    }

    /// Literals in order.
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Literal words in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.literals.iter().map(|literal| literal.word.as_str())
    }

    /// Literal senses in order, index-aligned with [`Synset::words`].
    pub fn senses(&self) -> impl Iterator<Item = &str> {
        self.literals.iter().map(|literal| literal.sense.as_str())
    }

    pub fn has_literal(&self, word: &str) -> bool {
        self.literals.iter().any(|literal| literal.word == word)
    }

    /// Append a literal. Fails if the word is already present.
    pub fn add_literal<W: Into<String>, S: Into<String>>(&mut self, word: W, sense: S) -> Result<()> {
        let word = word.into();
        if self.has_literal(&word) {
            return Err(LexiconError::duplicate_literal(word));
        }
        self.literals.push(Literal::new(word, sense));
        Ok(())
    }

    /// Remove a literal together with its sense.
    pub fn remove_literal(&mut self, word: &str) -> Result<Literal> {
        let position = self
            .literals
            .iter()
            .position(|literal| literal.word == word)
            .ok_or_else(|| LexiconError::literal_not_found(word))?;
        Ok(self.literals.remove(position))
    }

    /// Replace all literals. Every sense is reset to the empty string.
    pub fn set_literals<I, S>(&mut self, words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut literals: Vec<Literal> = Vec::new();
        for word in words {
            let word = word.into();
            if literals.iter().any(|literal| literal.word == word) {
                return Err(LexiconError::duplicate_literal(word));
            }
            literals.push(Literal::new(word, ""));
        }
        self.literals = literals;
        Ok(())
    }

    /// Check the invariants the constructors and setters enforce; used on
    /// deserialized synsets.
    pub fn validate(&self) -> Result<()> {
        ensure_id(&self.id)?;
        for (index, literal) in self.literals.iter().enumerate() {
            if self.literals[..index]
                .iter()
                .any(|earlier| earlier.word == literal.word)
            {
                return Err(LexiconError::duplicate_literal(literal.word.as_str()));
            }
        }
        if let Some(sentiment) = self.sentiment {
            Sentiment::new(sentiment.positive(), sentiment.negative(), sentiment.objective())?;
        }
        Ok(())
    }

    /// Replace all senses. The number of senses must match the number of literals.
    pub fn set_senses<I, S>(&mut self, senses: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let senses: Vec<String> = senses.into_iter().map(Into::into).collect();
        if senses.len() != self.literals.len() {
            return Err(LexiconError::invalid_argument(format!(
                "expected {} senses, got {}",
                self.literals.len(),
                senses.len()
            )));
        }
        for (literal, sense) in self.literals.iter_mut().zip(senses) {
            literal.sense = sense;
        }
        Ok(())
    }
}

impl fmt::Display for Synset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self.words().collect();
        write!(
            f,
            "Synset(id={:?}, literals={:?}, definition={:?})",
            self.id, words, self.definition
        )
    }
}
