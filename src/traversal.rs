//! Graph traversals over the relation graph.
//!
//! These functions work on raw node ids and never fail; the [`Lexicon`]
//! methods that wrap them validate ids and labels first.
//!
//! [`Lexicon`]: crate::lexicon::Lexicon

pub mod path;
pub mod walk;

pub use path::{lowest_common_ancestor, root_path, shortest_path};
pub use walk::{BreadthFirstWalk, WalkStep};
