//! Node kinds stored in the document tree

use serde::{Deserialize, Serialize};

/// Enumeration of the node types the tree stores at or below body level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Paragraph,
    Run,
    Table,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeType::Paragraph => "paragraph",
            NodeType::Run => "run",
            NodeType::Table => "table",
        };
        write!(f, "{}", name)
    }
}
