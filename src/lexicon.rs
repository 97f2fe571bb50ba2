//! The lexicon aggregate and the structures it owns.

pub mod config;
pub mod lexicon;
pub mod literal_index;
pub mod registry;
pub mod snapshot;

pub use config::{LexiconConfig, LexiconSource, PersistFormat};
pub use lexicon::{Lexicon, LexiconStats};
pub use literal_index::LiteralIndex;
pub use registry::SynsetRegistry;
pub use snapshot::LexiconSnapshot;
