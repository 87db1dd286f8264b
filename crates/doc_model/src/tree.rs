//! Document tree operations and storage

use crate::{
    DocModelError, Document, NodeId, Paragraph, Result, Run, Table,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Storage for the different node types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeStorage {
    pub paragraphs: HashMap<NodeId, Paragraph>,
    pub runs: HashMap<NodeId, Run>,
    pub tables: HashMap<NodeId, Table>,
}

/// The complete document tree structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTree {
    /// The root document
    pub document: Document,
    /// Storage for all nodes
    pub nodes: NodeStorage,
    /// Style registry for this document
    pub styles: crate::StyleRegistry,
}

impl DocumentTree {
    /// Create a new empty document tree
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            nodes: NodeStorage::default(),
            styles: crate::StyleRegistry::default(),
        }
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn paragraph(&self, id: NodeId) -> Option<&Paragraph> {
        self.nodes.paragraphs.get(&id)
    }

    pub fn paragraph_mut(&mut self, id: NodeId) -> Option<&mut Paragraph> {
        self.nodes.paragraphs.get_mut(&id)
    }

    pub fn run(&self, id: NodeId) -> Option<&Run> {
        self.nodes.runs.get(&id)
    }

    pub fn run_mut(&mut self, id: NodeId) -> Option<&mut Run> {
        self.nodes.runs.get_mut(&id)
    }

    pub fn table(&self, id: NodeId) -> Option<&Table> {
        self.nodes.tables.get(&id)
    }

    /// Body paragraphs in document order
    pub fn body_paragraphs(&self) -> Vec<NodeId> {
        self.document
            .children()
            .iter()
            .copied()
            .filter(|id| self.nodes.paragraphs.contains_key(id))
            .collect()
    }

    /// Body tables in document order
    pub fn body_tables(&self) -> Vec<NodeId> {
        self.document
            .children()
            .iter()
            .copied()
            .filter(|id| self.nodes.tables.contains_key(id))
            .collect()
    }

    pub fn paragraph_count(&self) -> usize {
        self.body_paragraphs().len()
    }

    pub fn table_count(&self) -> usize {
        self.body_tables().len()
    }

    /// Concatenated text of a paragraph's runs, in order
    pub fn paragraph_text(&self, para_id: NodeId) -> String {
        let mut text = String::new();
        if let Some(para) = self.nodes.paragraphs.get(&para_id) {
            for run_id in para.runs() {
                if let Some(run) = self.nodes.runs.get(run_id) {
                    text.push_str(&run.text);
                }
            }
        }
        text
    }

    /// Paragraph text elided to `max_graphemes`, with a `...` marker when
    /// truncated. Never splits a grapheme cluster.
    pub fn paragraph_preview(&self, para_id: NodeId, max_graphemes: usize) -> String {
        let text = self.paragraph_text(para_id);
        let graphemes: Vec<&str> = text.graphemes(true).collect();
        if graphemes.len() <= max_graphemes {
            text
        } else {
            let mut preview: String = graphemes[..max_graphemes].concat();
            preview.push_str("...");
            preview
        }
    }

    // ------------------------------------------------------------------
    // Structural mutation
    // ------------------------------------------------------------------

    /// Append a paragraph to the end of the body, returning its ID
    pub fn append_paragraph(&mut self, para: Paragraph) -> NodeId {
        let para_id = para.id();
        self.nodes.paragraphs.insert(para_id, para);
        self.document.add_body_child(para_id);
        para_id
    }

    /// Move a body child so it becomes the immediate next sibling of
    /// `target_id`, preserving the relative order of all other siblings.
    pub fn move_after(&mut self, child_id: NodeId, target_id: NodeId) -> Result<()> {
        if self.document.body_index(child_id).is_none() {
            return Err(DocModelError::NodeNotFound(child_id.as_uuid()));
        }
        self.document.remove_body_child(child_id);
        let target_index = self
            .document
            .body_index(target_id)
            .ok_or(DocModelError::NodeNotFound(target_id.as_uuid()))?;
        self.document.insert_body_child(target_index + 1, child_id);
        Ok(())
    }

    /// Append a table to the end of the body, returning its ID
    pub fn append_table(&mut self, table: Table) -> NodeId {
        let table_id = table.id();
        self.nodes.tables.insert(table_id, table);
        self.document.add_body_child(table_id);
        table_id
    }

    /// Append a run to a paragraph, returning the run's ID
    pub fn append_run(&mut self, run: Run, para_id: NodeId) -> Result<NodeId> {
        let para = self
            .nodes
            .paragraphs
            .get_mut(&para_id)
            .ok_or(DocModelError::NodeNotFound(para_id.as_uuid()))?;
        let run_id = run.id();
        para.add_run(run_id);
        self.nodes.runs.insert(run_id, run);
        self.document.increment_version();
        Ok(run_id)
    }

    /// Remove all runs from a paragraph, dropping their nodes
    pub fn clear_paragraph_runs(&mut self, para_id: NodeId) -> Result<()> {
        let para = self
            .nodes
            .paragraphs
            .get_mut(&para_id)
            .ok_or(DocModelError::NodeNotFound(para_id.as_uuid()))?;
        for run_id in para.clear_runs() {
            self.nodes.runs.remove(&run_id);
        }
        self.document.increment_version();
        Ok(())
    }

    /// Unlink a paragraph from the body and drop it and its runs
    pub fn remove_paragraph(&mut self, para_id: NodeId) -> Result<()> {
        let para = self
            .nodes
            .paragraphs
            .remove(&para_id)
            .ok_or(DocModelError::NodeNotFound(para_id.as_uuid()))?;
        for run_id in para.runs() {
            self.nodes.runs.remove(run_id);
        }
        self.document.remove_body_child(para_id);
        Ok(())
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleId;
    use proptest::prelude::*;

    fn paragraph_with_text(tree: &mut DocumentTree, text: &str) -> NodeId {
        let para_id = tree.append_paragraph(Paragraph::new());
        tree.append_run(Run::new(text), para_id).unwrap();
        para_id
    }

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let mut tree = DocumentTree::new();
        let para_id = tree.append_paragraph(Paragraph::new());
        tree.append_run(Run::new("Hello "), para_id).unwrap();
        tree.append_run(Run::new("world"), para_id).unwrap();
        assert_eq!(tree.paragraph_text(para_id), "Hello world");
    }

    #[test]
    fn test_preview_elides_long_text() {
        let mut tree = DocumentTree::new();
        let para_id = paragraph_with_text(&mut tree, &"x".repeat(60));
        let preview = tree.paragraph_preview(para_id, 50);
        assert_eq!(preview.len(), 53);
        assert!(preview.ends_with("..."));

        let short_id = paragraph_with_text(&mut tree, "short");
        assert_eq!(tree.paragraph_preview(short_id, 50), "short");
    }

    #[test]
    fn test_preview_keeps_graphemes_whole() {
        let mut tree = DocumentTree::new();
        // Family emoji is a single grapheme built from several scalars
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let text = format!("{}{}", family.repeat(3), "tail");
        let para_id = paragraph_with_text(&mut tree, &text);
        let preview = tree.paragraph_preview(para_id, 3);
        assert_eq!(preview, format!("{}...", family.repeat(3)));
    }

    #[test]
    fn test_move_after_splices_sibling() {
        let mut tree = DocumentTree::new();
        let a = paragraph_with_text(&mut tree, "a");
        let b = paragraph_with_text(&mut tree, "b");
        let c = paragraph_with_text(&mut tree, "c");

        // New paragraphs land at the end; splice c after a
        tree.move_after(c, a).unwrap();
        assert_eq!(tree.body_paragraphs(), vec![a, c, b]);
    }

    #[test]
    fn test_move_after_missing_target_restores_nothing_lost() {
        let mut tree = DocumentTree::new();
        let a = paragraph_with_text(&mut tree, "a");
        let missing = NodeId::new();
        assert!(tree.move_after(a, missing).is_err());
    }

    #[test]
    fn test_remove_paragraph_drops_runs() {
        let mut tree = DocumentTree::new();
        let para_id = paragraph_with_text(&mut tree, "doomed");
        let run_id = tree.paragraph(para_id).unwrap().runs()[0];

        tree.remove_paragraph(para_id).unwrap();
        assert!(tree.paragraph(para_id).is_none());
        assert!(tree.run(run_id).is_none());
        assert_eq!(tree.paragraph_count(), 0);
    }

    #[test]
    fn test_clear_paragraph_runs() {
        let mut tree = DocumentTree::new();
        let para_id = tree.append_paragraph(Paragraph::new());
        tree.append_run(Run::new("one"), para_id).unwrap();
        tree.append_run(Run::new("two"), para_id).unwrap();

        tree.clear_paragraph_runs(para_id).unwrap();
        assert!(tree.paragraph(para_id).unwrap().runs().is_empty());
        assert_eq!(tree.paragraph_text(para_id), "");
    }

    #[test]
    fn test_body_filters_by_node_kind() {
        let mut tree = DocumentTree::new();
        let p = paragraph_with_text(&mut tree, "p");
        let t = tree.append_table(Table::new());
        assert_eq!(tree.body_paragraphs(), vec![p]);
        assert_eq!(tree.body_tables(), vec![t]);
    }

    #[test]
    fn test_append_run_to_missing_paragraph_fails() {
        let mut tree = DocumentTree::new();
        let result = tree.append_run(Run::new("x"), NodeId::new());
        assert!(matches!(result, Err(DocModelError::NodeNotFound(_))));
    }

    #[test]
    fn test_styled_paragraph_keeps_style() {
        let mut tree = DocumentTree::new();
        let para_id = tree.append_paragraph(Paragraph::with_style("Heading1"));
        assert_eq!(
            tree.paragraph(para_id).unwrap().style_id,
            Some(StyleId::new("Heading1"))
        );
    }

    proptest! {
        #[test]
        fn prop_insert_order_matches_body_order(texts in proptest::collection::vec("[a-z]{0,8}", 0..12)) {
            let mut tree = DocumentTree::new();
            let mut ids = Vec::new();
            for text in &texts {
                ids.push(paragraph_with_text(&mut tree, text));
            }
            prop_assert_eq!(tree.body_paragraphs(), ids.clone());
            for (id, text) in ids.iter().zip(texts.iter()) {
                prop_assert_eq!(tree.paragraph_text(*id), text.clone());
            }
        }

        #[test]
        fn prop_remove_preserves_other_order(count in 1usize..8, victim in 0usize..8) {
            let victim = victim % count;
            let mut tree = DocumentTree::new();
            let mut ids = Vec::new();
            for i in 0..count {
                ids.push(paragraph_with_text(&mut tree, &format!("p{}", i)));
            }
            tree.remove_paragraph(ids[victim]).unwrap();
            let expected: Vec<_> = ids
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != victim)
                .map(|(_, id)| *id)
                .collect();
            prop_assert_eq!(tree.body_paragraphs(), expected);
        }
    }
}
