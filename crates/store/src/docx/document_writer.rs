//! Document.xml writer
//!
//! Converts the DocumentTree to DOCX document.xml markup.

use crate::docx::error::DocxResult;
use crate::docx::namespaces;
use doc_model::{DocumentTree, NodeId, Paragraph, Run, Table};
use quick_xml::escape::escape;

/// Writer for document.xml
pub struct DocumentWriter;

impl DocumentWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate document.xml content
    pub fn write(&self, tree: &DocumentTree) -> DocxResult<String> {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));
        xml.push_str("<w:body>");

        for child_id in tree.document.children() {
            self.write_body_element(&mut xml, tree, *child_id)?;
        }

        xml.push_str("</w:body>");
        xml.push_str("</w:document>");

        Ok(xml)
    }

    /// Write a body-level element (paragraph or table)
    fn write_body_element(
        &self,
        xml: &mut String,
        tree: &DocumentTree,
        node_id: NodeId,
    ) -> DocxResult<()> {
        if let Some(para) = tree.paragraph(node_id) {
            self.write_paragraph(xml, tree, para)?;
        } else if let Some(table) = tree.table(node_id) {
            self.write_table(xml, table)?;
        }
        Ok(())
    }

    /// Write a paragraph element
    fn write_paragraph(
        &self,
        xml: &mut String,
        tree: &DocumentTree,
        para: &Paragraph,
    ) -> DocxResult<()> {
        xml.push_str("<w:p>");

        if let Some(style_id) = &para.style_id {
            xml.push_str(&format!(
                r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#,
                escape(style_id.as_str())
            ));
        }

        for run_id in para.runs() {
            if let Some(run) = tree.run(*run_id) {
                self.write_run(xml, run);
            }
        }

        xml.push_str("</w:p>");
        Ok(())
    }

    /// Write a run element with its formatting overrides
    fn write_run(&self, xml: &mut String, run: &Run) {
        xml.push_str("<w:r>");

        let props = &run.props;
        if !props.is_empty() {
            xml.push_str("<w:rPr>");
            match props.bold {
                Some(true) => xml.push_str("<w:b/>"),
                Some(false) => xml.push_str(r#"<w:b w:val="0"/>"#),
                None => {}
            }
            match props.italic {
                Some(true) => xml.push_str("<w:i/>"),
                Some(false) => xml.push_str(r#"<w:i w:val="0"/>"#),
                None => {}
            }
            if let Some(size) = props.font_size {
                // Font sizes are stored as half-points
                xml.push_str(&format!(
                    r#"<w:sz w:val="{}"/>"#,
                    (size * 2.0).round() as i32
                ));
            }
            xml.push_str("</w:rPr>");
        }

        xml.push_str(&format!(
            r#"<w:t xml:space="preserve">{}</w:t>"#,
            escape(run.text.as_str())
        ));
        xml.push_str("</w:r>");
    }

    /// Write a table with its rows of plain-text cells
    fn write_table(&self, xml: &mut String, table: &Table) -> DocxResult<()> {
        xml.push_str("<w:tbl>");
        for row in &table.rows {
            xml.push_str("<w:tr>");
            for cell in &row.cells {
                xml.push_str("<w:tc><w:p><w:r>");
                xml.push_str(&format!(
                    r#"<w:t xml:space="preserve">{}</w:t>"#,
                    escape(cell.text.as_str())
                ));
                xml.push_str("</w:r></w:p></w:tc>");
            }
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
        Ok(())
    }
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}
