//! Document Model - Core document tree structure and types
//!
//! This crate provides the in-memory document tree for the precision editor:
//! a root document with ordered body children (paragraphs and tables), typed
//! node storage keyed by stable node IDs, and a minimal style registry.

mod document;
mod error;
mod node;
mod node_id;
mod paragraph;
mod run;
mod style;
mod table;
mod tree;

pub use document::*;
pub use error::*;
pub use node::*;
pub use node_id::*;
pub use paragraph::*;
pub use run::*;
pub use style::*;
pub use table::*;
pub use tree::*;
