//! Paragraph node - a block of content containing runs

use crate::{NodeId, StyleId};
use serde::{Deserialize, Serialize};

/// A paragraph containing text runs in document order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    id: NodeId,
    /// IDs of child runs, in order
    runs: Vec<NodeId>,
    /// Paragraph style reference, e.g. "Normal" or "Heading1"
    pub style_id: Option<StyleId>,
}

impl Paragraph {
    /// Create a new empty paragraph with the default style
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            runs: Vec::new(),
            style_id: Some(StyleId::new("Normal")),
        }
    }

    /// Create a paragraph with a specific style reference
    pub fn with_style(style_id: impl Into<StyleId>) -> Self {
        Self {
            id: NodeId::new(),
            runs: Vec::new(),
            style_id: Some(style_id.into()),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Child run IDs in document order
    pub fn runs(&self) -> &[NodeId] {
        &self.runs
    }

    /// Append a child run ID
    pub fn add_run(&mut self, run_id: NodeId) {
        self.runs.push(run_id);
    }

    /// Insert a child run at a specific index
    pub fn insert_run(&mut self, index: usize, run_id: NodeId) {
        self.runs.insert(index, run_id);
    }

    /// Remove a child run by ID
    pub fn remove_run(&mut self, run_id: NodeId) -> bool {
        if let Some(pos) = self.runs.iter().position(|&id| id == run_id) {
            self.runs.remove(pos);
            true
        } else {
            false
        }
    }

    /// Drop all child run IDs
    pub fn clear_runs(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.runs)
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_order_preserved() {
        let mut para = Paragraph::new();
        let a = NodeId::new();
        let b = NodeId::new();
        let c = NodeId::new();
        para.add_run(a);
        para.add_run(c);
        para.insert_run(1, b);
        assert_eq!(para.runs(), &[a, b, c]);

        assert!(para.remove_run(b));
        assert_eq!(para.runs(), &[a, c]);
        assert!(!para.remove_run(b));
    }

    #[test]
    fn test_clear_runs_returns_children() {
        let mut para = Paragraph::new();
        let a = NodeId::new();
        para.add_run(a);
        assert_eq!(para.clear_runs(), vec![a]);
        assert!(para.runs().is_empty());
    }
}
