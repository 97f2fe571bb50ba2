//! Error types for the Lexigraph library.
//!
//! All errors are represented by the [`LexiconError`] enum. Graph and registry
//! failures carry the offending synset id or relation label so callers can
//! correct the request and retry.
//!
//! # Examples
//!
//! ```
//! use lexigraph::error::{LexiconError, Result};
//!
//! fn lookup(id: &str) -> Result<()> {
//!     Err(LexiconError::not_in_lexicon(id))
//! }
//!
//! match lookup("ENG30-00000001-n") {
//!     Ok(_) => println!("Found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Lexigraph operations.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// I/O errors at the load/save boundary
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A synset id is not registered in the lexicon
    #[error("Synset with id '{id}' is not in the lexicon")]
    NotInLexicon { id: String },

    /// A synset id is already registered in the lexicon
    #[error("Synset with id '{id}' is already in the lexicon")]
    AlreadyInLexicon { id: String },

    /// A relation label is not in the relation type registry
    #[error("Relation '{label}' is not a registered relation type")]
    InvalidRelationType { label: String },

    /// A relation label is already in the relation type registry
    #[error("Relation type '{label}' is already registered")]
    DuplicateRelationType { label: String },

    /// An edge source -> target already exists (any label)
    #[error("There is already a relation from '{source_id}' to '{target_id}'")]
    RelationAlreadyExists { source_id: String, target_id: String },

    /// No edge source -> target exists
    #[error("There is no relation from '{source_id}' to '{target_id}'")]
    EdgeNotFound { source_id: String, target_id: String },

    /// A literal is already present in a synset
    #[error("Literal '{word}' is already in the synset")]
    DuplicateLiteral { word: String },

    /// A literal is not present in a synset
    #[error("Literal '{word}' is not in the synset")]
    LiteralNotFound { word: String },

    /// No path connects two synsets
    #[error("No path from '{source_id}' to '{target_id}'")]
    PathNotFound { source_id: String, target_id: String },

    /// An id matched a generation prefix/suffix but its middle is not numeric
    #[error("Malformed synset id '{id}': {reason}")]
    MalformedSynsetId { id: String, reason: String },

    /// Persisted state violates the expected structure
    #[error("Malformed persisted state: {0}")]
    MalformedPersistedState(String),

    /// Invalid argument (empty id, wrong sentiment shape, etc.)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Encoder-side serialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with LexiconError.
pub type Result<T> = std::result::Result<T, LexiconError>;

impl LexiconError {
    /// Create a new not-in-lexicon error.
    pub fn not_in_lexicon<S: Into<String>>(id: S) -> Self {
        LexiconError::NotInLexicon { id: id.into() }
    }

    /// Create a new already-in-lexicon error.
    pub fn already_in_lexicon<S: Into<String>>(id: S) -> Self {
        LexiconError::AlreadyInLexicon { id: id.into() }
    }

    /// Create a new invalid relation type error.
    pub fn invalid_relation_type<S: Into<String>>(label: S) -> Self {
        LexiconError::InvalidRelationType {
            label: label.into(),
        }
    }

    /// Create a new duplicate relation type error.
    pub fn duplicate_relation_type<S: Into<String>>(label: S) -> Self {
        LexiconError::DuplicateRelationType {
            label: label.into(),
        }
    }

    /// Create a new relation-already-exists error.
    pub fn relation_already_exists<S: Into<String>, T: Into<String>>(source: S, target: T) -> Self {
        LexiconError::RelationAlreadyExists {
            source_id: source.into(),
            target_id: target.into(),
        }
    }

    /// Create a new edge-not-found error.
    pub fn edge_not_found<S: Into<String>, T: Into<String>>(source: S, target: T) -> Self {
        LexiconError::EdgeNotFound {
            source_id: source.into(),
            target_id: target.into(),
        }
    }

    /// Create a new duplicate literal error.
    pub fn duplicate_literal<S: Into<String>>(word: S) -> Self {
        LexiconError::DuplicateLiteral { word: word.into() }
    }

    /// Create a new literal-not-found error.
    pub fn literal_not_found<S: Into<String>>(word: S) -> Self {
        LexiconError::LiteralNotFound { word: word.into() }
    }

    /// Create a new path-not-found error.
    pub fn path_not_found<S: Into<String>, T: Into<String>>(source: S, target: T) -> Self {
        LexiconError::PathNotFound {
            source_id: source.into(),
            target_id: target.into(),
        }
    }

    /// Create a new malformed synset id error.
    pub fn malformed_synset_id<S: Into<String>, R: Into<String>>(id: S, reason: R) -> Self {
        LexiconError::MalformedSynsetId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a new malformed persisted state error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        LexiconError::MalformedPersistedState(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LexiconError::InvalidArgument(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        LexiconError::Serialization(msg.into())
    }
}

/// Reject empty synset ids before any registry lookup.
pub(crate) fn ensure_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(LexiconError::invalid_argument(
            "synset id must be a non-empty string",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LexiconError::not_in_lexicon("a");
        assert_eq!(error.to_string(), "Synset with id 'a' is not in the lexicon");

        let error = LexiconError::relation_already_exists("a", "b");
        assert_eq!(
            error.to_string(),
            "There is already a relation from 'a' to 'b'"
        );

        let error = LexiconError::invalid_relation_type("meronym");
        assert_eq!(
            error.to_string(),
            "Relation 'meronym' is not a registered relation type"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let lexicon_error = LexiconError::from(io_error);

        match lexicon_error {
            LexiconError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_ensure_id() {
        assert!(ensure_id("x").is_ok());
        assert!(matches!(
            ensure_id(""),
            Err(LexiconError::InvalidArgument(_))
        ));
    }
}
