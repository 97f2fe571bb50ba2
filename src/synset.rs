//! Synset records and their scalar field types.

pub mod synset;
pub mod types;

pub use synset::{Literal, Synset};
pub use types::{Pos, Sentiment, SumoType};
