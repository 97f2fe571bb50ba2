//! Configuration for opening and querying a lexicon.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

/// On-disk representation of a lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistFormat {
    /// Tagged XML text, one element per synset.
    Xml,
    /// Framed bincode snapshot of the full internal state.
    #[default]
    Binary,
}

impl PersistFormat {
    /// Guess the format from a file extension (`.xml` is XML, anything else binary).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => PersistFormat::Xml,
            _ => PersistFormat::Binary,
        }
    }
}

/// Where a lexicon is loaded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LexiconSource {
    /// A file chosen by the caller.
    Explicit { path: PathBuf, format: PersistFormat },
    /// The default resource configured by the hosting application.
    DefaultBundled,
}

/// Lexicon configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Relation followed by root-path and common-ancestor queries when none is given.
    pub root_relation: String,

    /// Default prefix for generated synset ids.
    pub id_prefix: String,

    /// Default suffix for generated synset ids.
    pub id_suffix: String,

    /// Whether the XML reader also indexes each `_`-separated part of a
    /// compound literal as a literal of its own.
    pub split_compound_literals: bool,

    /// File that `LexiconSource::DefaultBundled` resolves to.
    pub default_source: Option<PathBuf>,

    /// Format of `default_source`.
    pub default_format: PersistFormat,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        LexiconConfig {
            root_relation: "hypernym".to_string(),
            id_prefix: "ENG30-".to_string(),
            id_suffix: "-n".to_string(),
            split_compound_literals: true,
            default_source: None,
            default_format: PersistFormat::Binary,
        }
    }
}

impl LexiconConfig {
    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Point `DefaultBundled` at a file.
    pub fn with_default_source<P: Into<PathBuf>>(mut self, path: P, format: PersistFormat) -> Self {
        self.default_source = Some(path.into());
        self.default_format = format;
        self
    }

    /// Resolve a source to a concrete path and format.
    pub fn resolve(&self, source: &LexiconSource) -> Result<(PathBuf, PersistFormat)> {
        match source {
            LexiconSource::Explicit { path, format } => Ok((path.clone(), *format)),
            LexiconSource::DefaultBundled => match &self.default_source {
                Some(path) => Ok((path.clone(), self.default_format)),
                None => Err(LexiconError::invalid_argument(
                    "no default lexicon resource is configured",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LexiconConfig::default();
        assert_eq!(config.root_relation, "hypernym");
        assert_eq!(config.id_prefix, "ENG30-");
        assert_eq!(config.id_suffix, "-n");
        assert!(config.split_compound_literals);
    }

    #[test]
    fn test_partial_json() {
        let config: LexiconConfig =
            serde_json::from_str(r#"{"root_relation": "hyponym", "default_format": "xml"}"#)
                .unwrap();
        assert_eq!(config.root_relation, "hyponym");
        assert_eq!(config.default_format, PersistFormat::Xml);
        assert_eq!(config.id_prefix, "ENG30-");
    }

    #[test]
    fn test_resolve() {
        let config = LexiconConfig::default();
        assert!(matches!(
            config.resolve(&LexiconSource::DefaultBundled),
            Err(LexiconError::InvalidArgument(_))
        ));

        let config = config.with_default_source("/data/rown.xml", PersistFormat::Xml);
        let (path, format) = config.resolve(&LexiconSource::DefaultBundled).unwrap();
        assert_eq!(path, PathBuf::from("/data/rown.xml"));
        assert_eq!(format, PersistFormat::Xml);

        let explicit = LexiconSource::Explicit {
            path: PathBuf::from("a.bin"),
            format: PersistFormat::Binary,
        };
        assert_eq!(
            config.resolve(&explicit).unwrap(),
            (PathBuf::from("a.bin"), PersistFormat::Binary)
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(PersistFormat::from_path("wn.XML"), PersistFormat::Xml);
        assert_eq!(PersistFormat::from_path("wn.bin"), PersistFormat::Binary);
        assert_eq!(PersistFormat::from_path("wn"), PersistFormat::Binary);
    }
}
