//! Structure mapper
//!
//! Walks the document tree once per request and produces the nested outline
//! plus a fresh identifier table. This is a pure read: the tree is never
//! modified here.

use doc_model::{DocumentTree, NodeId, NodeType, StyleId};
use serde::Serialize;
use std::collections::HashMap;

/// Paragraph previews are elided beyond this many graphemes
pub const PREVIEW_GRAPHEMES: usize = 50;

/// Identifier of the synthetic container for content before the first heading
const ROOT_CONTAINER_ID: &str = "h_root";

/// A resolved, non-owning handle into the live tree.
/// The kind travels with the handle so dispatch is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementHandle {
    Paragraph(NodeId),
    Run { paragraph: NodeId, run: NodeId },
    Table(NodeId),
}

impl ElementHandle {
    pub fn kind(&self) -> NodeType {
        match self {
            ElementHandle::Paragraph(_) => NodeType::Paragraph,
            ElementHandle::Run { .. } => NodeType::Run,
            ElementHandle::Table(_) => NodeType::Table,
        }
    }
}

/// Generation-scoped mapping from string identifier to element handle.
/// Valid only against the tree version it was generated from; tables from
/// different generations are never merged.
#[derive(Debug, Default)]
pub struct IdentifierTable {
    entries: HashMap<String, ElementHandle>,
    generation: u64,
}

impl IdentifierTable {
    fn new(generation: u64) -> Self {
        Self {
            entries: HashMap::new(),
            generation,
        }
    }

    /// The tree version this table was generated from
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resolve(&self, id: &str) -> Option<ElementHandle> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, id: String, handle: ElementHandle) {
        self.entries.insert(id, handle);
    }
}

/// The nested outline returned by the `map` command
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentMap {
    pub sections: Vec<Section>,
    pub tables: Vec<TableSummary>,
    pub metadata: MapMetadata,
}

/// A document section. A single section (`s1`) covers the whole body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Section {
    pub id: String,
    pub headings: Vec<HeadingNode>,
}

/// A heading paragraph and the plain content that follows it until the
/// next heading of any level
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeadingNode {
    pub id: String,
    pub level: u32,
    pub text: String,
    pub paragraphs: Vec<ContentNode>,
}

/// A plain content paragraph with its run descriptors
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentNode {
    pub id: String,
    /// Preview text, elided beyond [`PREVIEW_GRAPHEMES`]
    pub text: String,
    pub runs: Vec<RunDescriptor>,
}

/// The smallest formatting-addressable unit.
/// `bold`/`italic` are tri-state: `null` means inherited from the style.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunDescriptor {
    pub id: String,
    pub text: String,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

/// Flat table entry; only the row count is exposed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableSummary {
    pub id: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapMetadata {
    pub total_paragraphs: usize,
    pub total_tables: usize,
}

/// Walk the tree and produce the outline plus a fresh identifier table.
///
/// Paragraph identifiers are `p<N>` by zero-based position among all body
/// paragraphs (headings included); run identifiers are `p<N>_r<M>` scoped
/// to their paragraph; tables get `t<N>`. The synthetic `h_root` container
/// holds content preceding the first heading.
pub fn generate_map(tree: &DocumentTree) -> (DocumentMap, IdentifierTable) {
    let mut table = IdentifierTable::new(tree.document.version());

    let mut headings = vec![HeadingNode {
        id: ROOT_CONTAINER_ID.to_string(),
        level: 0,
        text: "Root".to_string(),
        paragraphs: Vec::new(),
    }];

    for (i, para_id) in tree.body_paragraphs().into_iter().enumerate() {
        let p_id = format!("p{}", i);
        table.insert(p_id.clone(), ElementHandle::Paragraph(para_id));

        let style_name = paragraph_style_name(tree, para_id);
        if style_name.starts_with("Heading") {
            headings.push(HeadingNode {
                id: p_id,
                level: heading_level(&style_name),
                text: tree.paragraph_text(para_id),
                paragraphs: Vec::new(),
            });
        } else {
            let mut runs = Vec::new();
            if let Some(para) = tree.paragraph(para_id) {
                for (j, run_id) in para.runs().iter().enumerate() {
                    if let Some(run) = tree.run(*run_id) {
                        let r_id = format!("{}_r{}", p_id, j);
                        table.insert(
                            r_id.clone(),
                            ElementHandle::Run {
                                paragraph: para_id,
                                run: *run_id,
                            },
                        );
                        runs.push(RunDescriptor {
                            id: r_id,
                            text: run.text.clone(),
                            bold: run.props.bold,
                            italic: run.props.italic,
                        });
                    }
                }
            }
            // Attach to the most recently opened heading; the root
            // container guarantees the list is never empty
            if let Some(heading) = headings.last_mut() {
                heading.paragraphs.push(ContentNode {
                    id: p_id,
                    text: tree.paragraph_preview(para_id, PREVIEW_GRAPHEMES),
                    runs,
                });
            }
        }
    }

    let mut tables = Vec::new();
    for (i, table_id) in tree.body_tables().into_iter().enumerate() {
        let t_id = format!("t{}", i);
        table.insert(t_id.clone(), ElementHandle::Table(table_id));
        if let Some(t) = tree.table(table_id) {
            tables.push(TableSummary {
                id: t_id,
                rows: t.row_count(),
            });
        }
    }

    let map = DocumentMap {
        metadata: MapMetadata {
            total_paragraphs: tree.paragraph_count(),
            total_tables: tables.len(),
        },
        sections: vec![Section {
            id: "s1".to_string(),
            headings,
        }],
        tables,
    };

    (map, table)
}

/// Resolve a paragraph's style display name, defaulting to "Normal" when
/// the paragraph has no style reference
fn paragraph_style_name(tree: &DocumentTree, para_id: NodeId) -> String {
    tree.paragraph(para_id)
        .and_then(|p| p.style_id.as_ref())
        .map(|id: &StyleId| tree.styles.display_name(id))
        .unwrap_or_else(|| "Normal".to_string())
}

/// Derive a heading level from a style name: the trailing token parsed as
/// an integer ("Heading 2"), falling back to a trailing digit run
/// ("Heading2"), defaulting to 1 for malformed or localized names
fn heading_level(style_name: &str) -> u32 {
    if let Some(token) = style_name.split_whitespace().last() {
        if let Ok(level) = token.parse::<u32>() {
            return level;
        }
        let digits: String = token
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if let Ok(level) = digits.parse::<u32>() {
            return level;
        }
    }
    1
}
