//! Document.xml parser
//!
//! Parses the main document content: paragraphs with their style reference,
//! runs with bold/italic/size overrides, and tables (rows of cell text).

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::reader::XmlParser;
use doc_model::{
    CharacterProperties, DocumentTree, Paragraph, Run, StyleId, Table, TableCell, TableRow,
};
use quick_xml::events::Event;

/// Parser for document.xml
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse document.xml and populate the DocumentTree
    pub fn parse(&self, content: &str, tree: &mut DocumentTree) -> DocxResult<()> {
        let mut reader = XmlParser::from_string(content);
        let mut buf = Vec::new();

        // Parse state
        let mut in_body = false;
        let mut current_para: Option<ParsedParagraph> = None;
        let mut current_run: Option<ParsedRun> = None;
        let mut in_para_props = false;
        let mut in_run_props = false;
        let mut in_text = false;
        let mut current_table: Option<Table> = None;
        let mut current_row: Option<TableRow> = None;
        let mut current_cell: Option<String> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = e.name();
                    let name_ref = name.as_ref();

                    if XmlParser::matches_element(name_ref, "body") {
                        in_body = true;
                    } else if in_body && XmlParser::matches_element(name_ref, "tbl") {
                        current_table = Some(Table::new());
                    } else if current_table.is_some() && XmlParser::matches_element(name_ref, "tr")
                    {
                        current_row = Some(TableRow::new());
                    } else if current_row.is_some() && XmlParser::matches_element(name_ref, "tc") {
                        current_cell = Some(String::new());
                    } else if in_body
                        && current_table.is_none()
                        && XmlParser::matches_element(name_ref, "p")
                    {
                        current_para = Some(ParsedParagraph::new());
                    } else if current_para.is_some() && XmlParser::matches_element(name_ref, "pPr")
                    {
                        in_para_props = true;
                    } else if current_para.is_some()
                        && current_table.is_none()
                        && XmlParser::matches_element(name_ref, "r")
                    {
                        current_run = Some(ParsedRun::new());
                    } else if current_run.is_some() && XmlParser::matches_element(name_ref, "rPr") {
                        in_run_props = true;
                    } else if XmlParser::matches_element(name_ref, "t") {
                        in_text = true;
                    } else if in_para_props {
                        if let Some(para) = current_para.as_mut() {
                            parse_para_property(e, para);
                        }
                    } else if in_run_props {
                        if let Some(run) = current_run.as_mut() {
                            parse_run_property(e, run);
                        }
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = e.name();
                    let name_ref = name.as_ref();

                    if in_para_props {
                        if let Some(para) = current_para.as_mut() {
                            parse_para_property(e, para);
                        }
                    } else if in_run_props {
                        if let Some(run) = current_run.as_mut() {
                            parse_run_property(e, run);
                        }
                    } else if current_run.is_some() && XmlParser::matches_element(name_ref, "br") {
                        if let Some(ref mut run) = current_run {
                            run.text.push('\n');
                        }
                    } else if current_run.is_some() && XmlParser::matches_element(name_ref, "tab") {
                        if let Some(ref mut run) = current_run {
                            run.text.push('\t');
                        }
                    } else if in_body
                        && current_table.is_none()
                        && XmlParser::matches_element(name_ref, "p")
                    {
                        // Self-closing empty paragraph
                        commit_paragraph(ParsedParagraph::new(), tree);
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.name();
                    let name_ref = name.as_ref();

                    if XmlParser::matches_element(name_ref, "body") {
                        in_body = false;
                    } else if XmlParser::matches_element(name_ref, "tbl") {
                        if let Some(table) = current_table.take() {
                            tree.append_table(table);
                        }
                    } else if XmlParser::matches_element(name_ref, "tr") {
                        if let (Some(row), Some(table)) = (current_row.take(), current_table.as_mut())
                        {
                            table.add_row(row);
                        }
                    } else if XmlParser::matches_element(name_ref, "tc") {
                        if let (Some(text), Some(row)) = (current_cell.take(), current_row.as_mut())
                        {
                            row.cells.push(TableCell::new(text));
                        }
                    } else if XmlParser::matches_element(name_ref, "p") {
                        if let Some(parsed) = current_para.take() {
                            commit_paragraph(parsed, tree);
                        }
                    } else if XmlParser::matches_element(name_ref, "pPr") {
                        in_para_props = false;
                    } else if XmlParser::matches_element(name_ref, "r") {
                        if let Some(run) = current_run.take() {
                            if let Some(ref mut para) = current_para {
                                para.runs.push(run);
                            }
                        }
                    } else if XmlParser::matches_element(name_ref, "rPr") {
                        in_run_props = false;
                    } else if XmlParser::matches_element(name_ref, "t") {
                        in_text = false;
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if in_text {
                        let text = e
                            .unescape()
                            .map_err(|e| DocxError::XmlParse(e.to_string()))?;
                        if let Some(ref mut cell) = current_cell {
                            cell.push_str(&text);
                        } else if let Some(ref mut run) = current_run {
                            run.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::from(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a paragraph property element
fn parse_para_property(e: &quick_xml::events::BytesStart, para: &mut ParsedParagraph) {
    let name = e.name();
    if XmlParser::matches_element(name.as_ref(), "pStyle") {
        if let Some(val) = XmlParser::get_w_attribute(e, "val") {
            para.style_id = Some(val);
        }
    }
}

/// Parse a run property element
fn parse_run_property(e: &quick_xml::events::BytesStart, run: &mut ParsedRun) {
    let name = e.name();
    let name_ref = name.as_ref();

    if XmlParser::matches_element(name_ref, "b") {
        let val = XmlParser::get_w_attribute(e, "val");
        run.props.bold = Some(val.map(|v| XmlParser::parse_bool(&v)).unwrap_or(true));
    } else if XmlParser::matches_element(name_ref, "i") {
        let val = XmlParser::get_w_attribute(e, "val");
        run.props.italic = Some(val.map(|v| XmlParser::parse_bool(&v)).unwrap_or(true));
    } else if XmlParser::matches_element(name_ref, "sz") {
        if let Some(val) = XmlParser::get_w_attribute(e, "val") {
            run.props.font_size = XmlParser::parse_half_points(&val);
        }
    }
}

/// Commit a parsed paragraph to the tree
fn commit_paragraph(parsed: ParsedParagraph, tree: &mut DocumentTree) {
    let para = match &parsed.style_id {
        Some(style_id) => Paragraph::with_style(StyleId::new(style_id.clone())),
        None => Paragraph::new(),
    };
    let para_id = tree.append_paragraph(para);

    for parsed_run in parsed.runs {
        // Don't create empty runs
        if parsed_run.text.is_empty() {
            continue;
        }
        let run = Run::with_props(&parsed_run.text, parsed_run.props);
        // Paragraph was just inserted, so this cannot fail
        let _ = tree.append_run(run, para_id);
    }
}

/// Parsed paragraph data (before committing to the tree)
#[derive(Debug)]
struct ParsedParagraph {
    style_id: Option<String>,
    runs: Vec<ParsedRun>,
}

impl ParsedParagraph {
    fn new() -> Self {
        Self {
            style_id: None,
            runs: Vec::new(),
        }
    }
}

/// Parsed run data
#[derive(Debug)]
struct ParsedRun {
    props: CharacterProperties,
    text: String,
}

impl ParsedRun {
    fn new() -> Self {
        Self {
            props: CharacterProperties::default(),
            text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn parse_body(body: &str) -> DocumentTree {
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {}><w:body>{}</w:body></w:document>"#,
            NS, body
        );
        let mut tree = DocumentTree::new();
        DocumentParser::new().parse(&content, &mut tree).unwrap();
        tree
    }

    #[test]
    fn test_parse_paragraph_with_style_and_runs() {
        let tree = parse_body(concat!(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr>"#,
            r#"<w:r><w:t>Title</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:rPr><w:b/><w:i w:val="0"/><w:sz w:val="28"/></w:rPr>"#,
            r#"<w:t>Body text</w:t></w:r></w:p>"#,
        ));

        let paras = tree.body_paragraphs();
        assert_eq!(paras.len(), 2);
        assert_eq!(
            tree.paragraph(paras[0]).unwrap().style_id,
            Some(StyleId::new("Heading1"))
        );
        assert_eq!(tree.paragraph_text(paras[0]), "Title");

        let run_id = tree.paragraph(paras[1]).unwrap().runs()[0];
        let run = tree.run(run_id).unwrap();
        assert_eq!(run.text, "Body text");
        assert_eq!(run.props.bold, Some(true));
        assert_eq!(run.props.italic, Some(false));
        assert_eq!(run.props.font_size, Some(14.0));
    }

    #[test]
    fn test_parse_unstyled_paragraph_defaults_to_normal() {
        let tree = parse_body(r#"<w:p><w:r><w:t>plain</w:t></w:r></w:p>"#);
        let paras = tree.body_paragraphs();
        assert_eq!(
            tree.paragraph(paras[0]).unwrap().style_id,
            Some(StyleId::new("Normal"))
        );
        let run_id = tree.paragraph(paras[0]).unwrap().runs()[0];
        assert!(tree.run(run_id).unwrap().props.is_empty());
    }

    #[test]
    fn test_parse_empty_self_closing_paragraph() {
        let tree = parse_body(r#"<w:p/><w:p><w:r><w:t>x</w:t></w:r></w:p>"#);
        assert_eq!(tree.paragraph_count(), 2);
        let paras = tree.body_paragraphs();
        assert_eq!(tree.paragraph_text(paras[0]), "");
    }

    #[test]
    fn test_parse_table_rows_and_cells() {
        let tree = parse_body(concat!(
            r#"<w:tbl>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc>"#,
            r#"<w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"<w:tr><w:tc><w:p><w:r><w:t>c</w:t></w:r></w:p></w:tc></w:tr>"#,
            r#"</w:tbl>"#,
        ));

        let tables = tree.body_tables();
        assert_eq!(tables.len(), 1);
        let table = tree.table(tables[0]).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.rows[0].cells[1].text, "b");
        // Paragraphs inside table cells are not body paragraphs
        assert_eq!(tree.paragraph_count(), 0);
    }

    #[test]
    fn test_parse_break_and_tab_inside_run() {
        let tree = parse_body(r#"<w:p><w:r><w:t>a</w:t><w:br/><w:t>b</w:t><w:tab/></w:r></w:p>"#);
        let paras = tree.body_paragraphs();
        assert_eq!(tree.paragraph_text(paras[0]), "a\nb\t");
    }

    #[test]
    fn test_parse_escaped_text() {
        let tree = parse_body(r#"<w:p><w:r><w:t>a &amp; b &lt;c&gt;</w:t></w:r></w:p>"#);
        let paras = tree.body_paragraphs();
        assert_eq!(tree.paragraph_text(paras[0]), "a & b <c>");
    }

    #[test]
    fn test_malformed_markup_is_an_error() {
        let mut tree = DocumentTree::new();
        let result =
            DocumentParser::new().parse("<w:document><w:body></w:wrong></w:document>", &mut tree);
        assert!(result.is_err());
    }
}
