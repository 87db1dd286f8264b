//! Document root node and document-level operations

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// The root document node: an ordered sequence of block-level children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    id: NodeId,
    /// IDs of top-level body children (paragraphs and tables) in document order
    body_children: Vec<NodeId>,
    /// Version counter, bumped on every structural change
    version: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            body_children: Vec::new(),
            version: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Body children in document order
    pub fn children(&self) -> &[NodeId] {
        &self.body_children
    }

    /// Get the structural version. Identifier tables are valid only against
    /// the version they were generated from.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Append a child to the body
    pub fn add_body_child(&mut self, child_id: NodeId) {
        self.body_children.push(child_id);
        self.increment_version();
    }

    /// Insert a child at a specific index
    pub fn insert_body_child(&mut self, index: usize, child_id: NodeId) {
        self.body_children.insert(index, child_id);
        self.increment_version();
    }

    /// Remove a child by ID
    pub fn remove_body_child(&mut self, child_id: NodeId) -> bool {
        if let Some(pos) = self.body_children.iter().position(|&id| id == child_id) {
            self.body_children.remove(pos);
            self.increment_version();
            true
        } else {
            false
        }
    }

    /// Position of a child in the body, if present
    pub fn body_index(&self, child_id: NodeId) -> Option<usize> {
        self.body_children.iter().position(|&id| id == child_id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_ordering() {
        let mut doc = Document::new();
        let a = NodeId::new();
        let b = NodeId::new();
        let c = NodeId::new();
        doc.add_body_child(a);
        doc.add_body_child(c);
        doc.insert_body_child(1, b);
        assert_eq!(doc.children(), &[a, b, c]);
        assert_eq!(doc.body_index(c), Some(2));

        assert!(doc.remove_body_child(b));
        assert_eq!(doc.children(), &[a, c]);
        assert_eq!(doc.body_index(b), None);
    }

    #[test]
    fn test_version_bumps_on_structural_change() {
        let mut doc = Document::new();
        let v0 = doc.version();
        let a = NodeId::new();
        doc.add_body_child(a);
        assert!(doc.version() > v0);
        let v1 = doc.version();
        doc.remove_body_child(a);
        assert!(doc.version() > v1);
    }
}
