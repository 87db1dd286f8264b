//! DOCX Writer Infrastructure
//!
//! Assembles a ZIP archive with the parts a minimal, standards-valid DOCX
//! package needs: content types, relationships, document.xml, styles.xml.

use crate::docx::document_writer::DocumentWriter;
use crate::docx::error::DocxResult;
use crate::docx::namespaces;
use crate::docx::styles::StylesWriter;
use crate::docx::{DOCUMENT_PART, STYLES_PART};
use doc_model::DocumentTree;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new DOCX writer
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    /// Write a complete DOCX package from a DocumentTree
    pub fn write(mut self, tree: &DocumentTree) -> DocxResult<()> {
        let doc_xml = DocumentWriter::new().write(tree)?;
        self.write_file(DOCUMENT_PART, &doc_xml)?;

        let styles_xml = StylesWriter::new().write(&tree.styles)?;
        self.write_file(STYLES_PART, &styles_xml)?;

        self.write_file("_rels/.rels", &root_rels_xml())?;
        self.write_file("word/_rels/document.xml.rels", &document_rels_xml())?;
        self.write_file("[Content_Types].xml", &content_types_xml())?;

        self.zip.finish()?;
        Ok(())
    }

    /// Write a file to the ZIP archive
    fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn content_types_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Types xmlns="{ct}">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            r#"</Types>"#,
        ),
        ct = namespaces::CT
    )
}

fn root_rels_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="{rel}">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
            r#"</Relationships>"#,
        ),
        rel = namespaces::PKG_REL
    )
}

fn document_rels_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="{rel}">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            r#"</Relationships>"#,
        ),
        rel = namespaces::PKG_REL
    )
}
