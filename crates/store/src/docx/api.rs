//! Public API for DOCX import/export

use crate::docx::document::DocumentParser;
use crate::docx::error::DocxResult;
use crate::docx::reader::DocxReader;
use crate::docx::styles::StylesParser;
use crate::docx::writer::DocxWriter;
use crate::docx::{DOCUMENT_PART, STYLES_PART};
use doc_model::DocumentTree;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek};
use std::path::Path;

/// Import a DOCX file from disk and return a DocumentTree
pub fn import_docx(path: &Path) -> DocxResult<DocumentTree> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let tree = parse(reader)?;
    tracing::info!(
        path = %path.display(),
        paragraphs = tree.paragraph_count(),
        tables = tree.table_count(),
        "imported document"
    );
    Ok(tree)
}

/// Import a DOCX from an in-memory byte slice
pub fn import_docx_bytes(bytes: &[u8]) -> DocxResult<DocumentTree> {
    parse(Cursor::new(bytes))
}

/// Export a DocumentTree to a DOCX file on disk
pub fn export_docx(tree: &DocumentTree, path: &Path) -> DocxResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    DocxWriter::new(writer).write(tree)?;
    tracing::info!(path = %path.display(), "exported document");
    Ok(())
}

/// Export a DocumentTree to an in-memory byte vector
pub fn export_docx_bytes(tree: &DocumentTree) -> DocxResult<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let cursor = Cursor::new(&mut buffer);
        DocxWriter::new(cursor).write(tree)?;
    }
    Ok(buffer)
}

fn parse<R: Read + Seek>(source: R) -> DocxResult<DocumentTree> {
    let mut reader = DocxReader::new(source)?;
    let mut tree = DocumentTree::new();

    let document_xml = reader.read_file_as_string(DOCUMENT_PART)?;
    DocumentParser::new().parse(&document_xml, &mut tree)?;

    // styles.xml is optional; heading classification falls back to raw ids
    if reader.file_exists(STYLES_PART) {
        let styles_xml = reader.read_file_as_string(STYLES_PART)?;
        StylesParser::new().parse(&styles_xml, &mut tree.styles)?;
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::DocxError;
    use doc_model::{CharacterProperties, Paragraph, Run, Style, StyleId};

    fn sample_tree() -> DocumentTree {
        let mut tree = DocumentTree::new();
        tree.styles
            .register(Style::new("Heading1", "Heading 1").with_font_size(16.0));

        let title = tree.append_paragraph(Paragraph::with_style("Heading1"));
        tree.append_run(Run::new("Title"), title).unwrap();

        let body = tree.append_paragraph(Paragraph::new());
        tree.append_run(Run::new("Plain and "), body).unwrap();
        let props = CharacterProperties {
            bold: Some(true),
            ..Default::default()
        };
        tree.append_run(Run::with_props("bold", props), body)
            .unwrap();
        tree
    }

    #[test]
    fn test_bytes_roundtrip_preserves_structure() {
        let tree = sample_tree();
        let bytes = export_docx_bytes(&tree).unwrap();
        let reloaded = import_docx_bytes(&bytes).unwrap();

        assert_eq!(reloaded.paragraph_count(), 2);
        let paras = reloaded.body_paragraphs();
        assert_eq!(
            reloaded.paragraph(paras[0]).unwrap().style_id,
            Some(StyleId::new("Heading1"))
        );
        assert_eq!(reloaded.paragraph_text(paras[0]), "Title");
        assert_eq!(reloaded.paragraph_text(paras[1]), "Plain and bold");

        let second_run = reloaded.paragraph(paras[1]).unwrap().runs()[1];
        assert_eq!(reloaded.run(second_run).unwrap().props.bold, Some(true));

        let heading = reloaded.styles.get(&StyleId::new("Heading1")).unwrap();
        assert_eq!(heading.name, "Heading 1");
        assert_eq!(heading.font_size, Some(16.0));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");

        let tree = sample_tree();
        export_docx(&tree, &path).unwrap();
        let reloaded = import_docx(&path).unwrap();
        assert_eq!(reloaded.paragraph_count(), tree.paragraph_count());
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_docx(Path::new("/nonexistent/path/document.docx"));
        assert!(matches!(result, Err(DocxError::Io(_))));
    }

    #[test]
    fn test_import_not_an_archive() {
        let result = import_docx_bytes(b"this is not a zip file");
        assert!(matches!(result, Err(DocxError::Zip(_))));
    }

    #[test]
    fn test_import_archive_without_document_part() {
        let mut buffer = Vec::new();
        {
            let cursor = Cursor::new(&mut buffer);
            let mut zip = zip::ZipWriter::new(cursor);
            zip.start_file("hello.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            std::io::Write::write_all(&mut zip, b"hi").unwrap();
            zip.finish().unwrap();
        }
        let result = import_docx_bytes(&buffer);
        assert!(matches!(result, Err(DocxError::MissingPart(_))));
    }
}
