//! Ember Scene - Transform hierarchy
//!
//! A `SceneGraph` stores named nodes in a generational arena. Each node has a
//! local `Transform` and an optional non-owning parent handle. World matrices
//! are composed up the parent chain on demand and never cached.

mod graph;

pub use graph::{Node, NodeId, SceneGraph};
