//! Relation graph primitives: the labeled multigraph and the relation type registry.

pub mod relation_type;
pub mod store;

pub use relation_type::RelationTypeRegistry;
pub use store::{Edge, GraphStore, RelationTriple};
