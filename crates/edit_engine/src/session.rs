//! Editor session - identifier-addressed mutation engine
//!
//! One session owns one loaded document tree plus the identifier table from
//! the most recent map generation. Every operation resolves its identifier
//! through that table; if the tree's structural version has moved past the
//! table's generation, the table is regenerated first, so stale identifiers
//! are either remapped to their new position or reported as not found.
//! Operations are single-shot atomic tree edits: a resolution or argument
//! failure leaves the tree exactly as it was.

use crate::error::{EditError, EditResult};
use crate::mapper::{generate_map, DocumentMap, ElementHandle, IdentifierTable};
use doc_model::{DocumentTree, Paragraph, Run, StyleId};
use std::path::Path;
use store::IntegrityVerdict;

/// Tunable session behavior
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Reject boolean values other than `true`/`false` instead of treating
    /// anything but "true" as false
    pub strict_bool: bool,
    /// New paragraphs inserted after a target inherit its paragraph style
    /// (including heading styles)
    pub inherit_style: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            strict_bool: false,
            inherit_style: true,
        }
    }
}

/// Result of a successful mutation: a human-readable message plus an
/// optional warning for documented lossy paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub message: String,
    pub warning: Option<String>,
}

impl EditOutcome {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            warning: None,
        }
    }

    fn with_warning(message: impl Into<String>, warning: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            warning: Some(warning.into()),
        }
    }
}

/// An editing session bound to one loaded document
pub struct EditorSession {
    tree: DocumentTree,
    table: IdentifierTable,
    options: SessionOptions,
}

impl EditorSession {
    /// Load a document from disk and map it
    pub fn open(path: &Path, options: SessionOptions) -> EditResult<Self> {
        let tree = store::import_docx(path)?;
        Ok(Self::from_tree(tree, options))
    }

    /// Create a session over an existing tree
    pub fn from_tree(tree: DocumentTree, options: SessionOptions) -> Self {
        let (_, table) = generate_map(&tree);
        Self {
            tree,
            table,
            options,
        }
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Generate a fresh outline, superseding the previous identifier table
    pub fn map(&mut self) -> DocumentMap {
        let (map, table) = generate_map(&self.tree);
        self.table = table;
        map
    }

    /// Resolve an identifier against the current table, regenerating it
    /// first if any structural edit has happened since it was minted
    fn resolve(&mut self, id: &str) -> EditResult<ElementHandle> {
        if self.table.generation() != self.tree.document.version() {
            tracing::debug!("identifier table stale, regenerating map");
            let (_, table) = generate_map(&self.tree);
            self.table = table;
        }
        self.table
            .resolve(id)
            .ok_or_else(|| EditError::NotFound(id.to_string()))
    }

    /// Replace the text of a run or a whole paragraph.
    ///
    /// The run path mutates only that run's text and preserves all
    /// formatting. The paragraph path clears every existing run and inserts
    /// a single new run, discarding per-run formatting; the outcome carries
    /// an explicit warning for that documented loss.
    pub fn replace_text(&mut self, id: &str, new_text: &str) -> EditResult<EditOutcome> {
        match self.resolve(id)? {
            ElementHandle::Run { run, .. } => {
                let run = self
                    .tree
                    .run_mut(run)
                    .ok_or_else(|| EditError::NotFound(id.to_string()))?;
                run.text = new_text.to_string();
                tracing::debug!(id, "replaced run text");
                Ok(EditOutcome::new(format!(
                    "Updated run {}. Formatting preserved.",
                    id
                )))
            }
            ElementHandle::Paragraph(para_id) => {
                self.tree.clear_paragraph_runs(para_id)?;
                self.tree.append_run(Run::new(new_text), para_id)?;
                tracing::debug!(id, "replaced paragraph content");
                Ok(EditOutcome::with_warning(
                    format!("Updated paragraph {}.", id),
                    "existing run-level formatting on this paragraph was discarded",
                ))
            }
            handle @ ElementHandle::Table(_) => Err(EditError::UnsupportedTarget {
                operation: "replace",
                kind: handle.kind(),
                id: id.to_string(),
            }),
        }
    }

    /// Insert a new paragraph carrying `text` as the immediate next sibling
    /// of the target paragraph. The paragraph is first appended at the end
    /// of the body, then spliced after the target as the final step, so a
    /// failed splice cannot leave a half-linked node.
    pub fn insert_after(&mut self, id: &str, text: &str) -> EditResult<EditOutcome> {
        let handle = self.resolve(id)?;
        let target_id = match handle {
            ElementHandle::Paragraph(para_id) => para_id,
            other => {
                return Err(EditError::UnsupportedTarget {
                    operation: "insert_after",
                    kind: other.kind(),
                    id: id.to_string(),
                })
            }
        };

        let para = if self.options.inherit_style {
            match self
                .tree
                .paragraph(target_id)
                .and_then(|p| p.style_id.clone())
            {
                Some(style_id) => Paragraph::with_style(style_id),
                None => Paragraph::new(),
            }
        } else {
            Paragraph::new()
        };

        let new_id = self.tree.append_paragraph(para);
        self.tree.append_run(Run::new(text), new_id)?;
        self.tree.move_after(new_id, target_id)?;
        tracing::debug!(id, "inserted paragraph after target");
        Ok(EditOutcome::new(format!(
            "Inserted new paragraph after {}. Identifiers are stale; re-run map.",
            id
        )))
    }

    /// Delete the element behind an identifier.
    ///
    /// Paragraphs are unlinked from the body and dropped. Runs are cleared
    /// rather than removed: emptying text is the conservative choice that
    /// never disturbs surrounding markup.
    pub fn delete_element(&mut self, id: &str) -> EditResult<EditOutcome> {
        match self.resolve(id)? {
            ElementHandle::Paragraph(para_id) => {
                self.tree.remove_paragraph(para_id)?;
                tracing::debug!(id, "deleted paragraph");
                Ok(EditOutcome::new(format!(
                    "Deleted {}. Identifiers are stale; re-run map.",
                    id
                )))
            }
            ElementHandle::Run { run, .. } => {
                let run = self
                    .tree
                    .run_mut(run)
                    .ok_or_else(|| EditError::NotFound(id.to_string()))?;
                run.text.clear();
                tracing::debug!(id, "cleared run text");
                Ok(EditOutcome::new(format!("Cleared text from run {}.", id)))
            }
            handle @ ElementHandle::Table(_) => Err(EditError::UnsupportedTarget {
                operation: "delete",
                kind: handle.kind(),
                id: id.to_string(),
            }),
        }
    }

    /// Set a formatting property on a run or paragraph.
    ///
    /// Recognized properties are exactly `bold`, `italic` and `size`.
    /// On a run the effect is local. On a paragraph, `bold`/`italic`
    /// apply to the first run only, while `size` is set on the paragraph's
    /// *style* and therefore affects every paragraph sharing that style.
    pub fn format_element(&mut self, id: &str, prop: &str, value: &str) -> EditResult<EditOutcome> {
        let handle = self.resolve(id)?;
        let property = match prop {
            "bold" => FormatProperty::Bold(self.parse_flag(value)?),
            "italic" => FormatProperty::Italic(self.parse_flag(value)?),
            "size" => FormatProperty::Size(parse_size(value)?),
            other => return Err(EditError::UnrecognizedProperty(other.to_string())),
        };

        let mut warning = None;
        match handle {
            ElementHandle::Run { run, .. } => {
                let run = self
                    .tree
                    .run_mut(run)
                    .ok_or_else(|| EditError::NotFound(id.to_string()))?;
                match property {
                    FormatProperty::Bold(flag) => run.props.bold = Some(flag),
                    FormatProperty::Italic(flag) => run.props.italic = Some(flag),
                    FormatProperty::Size(points) => run.props.font_size = Some(points),
                }
            }
            ElementHandle::Paragraph(para_id) => match property {
                FormatProperty::Bold(_) | FormatProperty::Italic(_) => {
                    let first_run = self
                        .tree
                        .paragraph(para_id)
                        .and_then(|p| p.runs().first().copied());
                    match first_run {
                        Some(run_id) => {
                            let run = self
                                .tree
                                .run_mut(run_id)
                                .ok_or_else(|| EditError::NotFound(id.to_string()))?;
                            match property {
                                FormatProperty::Bold(flag) => run.props.bold = Some(flag),
                                FormatProperty::Italic(flag) => run.props.italic = Some(flag),
                                FormatProperty::Size(_) => {}
                            }
                        }
                        None => {
                            warning =
                                Some("paragraph has no runs; formatting had no effect".to_string());
                        }
                    }
                }
                FormatProperty::Size(points) => {
                    // Style-wide effect: every paragraph sharing the style
                    // picks up the new size
                    let style_id = self
                        .tree
                        .paragraph(para_id)
                        .and_then(|p| p.style_id.clone())
                        .unwrap_or_else(|| StyleId::new("Normal"));
                    self.tree.styles.set_font_size(&style_id, points);
                    warning = Some(format!(
                        "size was applied to style {}; every paragraph using it is affected",
                        style_id
                    ));
                }
            },
            handle @ ElementHandle::Table(_) => {
                return Err(EditError::UnsupportedTarget {
                    operation: "format",
                    kind: handle.kind(),
                    id: id.to_string(),
                })
            }
        }

        tracing::debug!(id, prop, value, "formatted element");
        let message = format!("Formatted {}: {}={}", id, prop, value);
        Ok(match warning {
            Some(warning) => EditOutcome::with_warning(message, warning),
            None => EditOutcome::new(message),
        })
    }

    /// Serialize the current tree to disk
    pub fn save(&self, path: &Path) -> EditResult<EditOutcome> {
        store::export_docx(&self.tree, path)?;
        Ok(EditOutcome::new(format!("Saved to {}", path.display())))
    }

    /// Validate a previously saved artifact
    pub fn validate(&self, path: &Path) -> IntegrityVerdict {
        store::validate_package(path)
    }

    /// Parse a boolean property value per the session's parsing policy
    fn parse_flag(&self, value: &str) -> EditResult<bool> {
        if self.options.strict_bool {
            match value.to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(EditError::ParseFailure(format!(
                    "expected true or false, got '{}'",
                    other
                ))),
            }
        } else {
            // Lenient policy: anything but "true" is false
            Ok(value.eq_ignore_ascii_case("true"))
        }
    }
}

enum FormatProperty {
    Bold(bool),
    Italic(bool),
    Size(f32),
}

fn parse_size(value: &str) -> EditResult<f32> {
    value
        .parse::<u32>()
        .map(|points| points as f32)
        .map_err(|_| {
            EditError::ParseFailure(format!("size expects an integer point value, got '{}'", value))
        })
}
