//! Styles.xml parser and writer
//!
//! Only paragraph styles are carried, and only the fields the editor needs:
//! the style id, its display name, and an optional font size.

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::namespaces;
use crate::docx::reader::XmlParser;
use doc_model::{Style, StyleId, StyleRegistry};
use quick_xml::events::Event;

/// Parser for styles.xml
pub struct StylesParser;

impl StylesParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse styles.xml into the style registry
    pub fn parse(&self, content: &str, registry: &mut StyleRegistry) -> DocxResult<()> {
        let mut reader = XmlParser::from_string(content);
        let mut buf = Vec::new();

        let mut current: Option<ParsedStyle> = None;
        let mut in_run_props = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let name = e.name();
                    let name_ref = name.as_ref();

                    if XmlParser::matches_element(name_ref, "style") {
                        let style_type = XmlParser::get_w_attribute(e, "type")
                            .unwrap_or_else(|| "paragraph".to_string());
                        let style_id = XmlParser::get_w_attribute(e, "styleId");
                        if style_type == "paragraph" {
                            current = style_id.map(ParsedStyle::new);
                        } else {
                            current = None;
                        }
                    } else if current.is_some() && XmlParser::matches_element(name_ref, "rPr") {
                        in_run_props = true;
                    } else if let Some(style) = current.as_mut() {
                        if XmlParser::matches_element(name_ref, "name") {
                            if let Some(val) = XmlParser::get_w_attribute(e, "val") {
                                style.name = Some(val);
                            }
                        } else if in_run_props && XmlParser::matches_element(name_ref, "sz") {
                            if let Some(val) = XmlParser::get_w_attribute(e, "val") {
                                style.font_size = XmlParser::parse_half_points(&val);
                            }
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.name();
                    let name_ref = name.as_ref();

                    if XmlParser::matches_element(name_ref, "style") {
                        if let Some(parsed) = current.take() {
                            registry.register(parsed.into_style());
                        }
                        in_run_props = false;
                    } else if XmlParser::matches_element(name_ref, "rPr") {
                        in_run_props = false;
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

impl Default for StylesParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct ParsedStyle {
    id: String,
    name: Option<String>,
    font_size: Option<f32>,
}

impl ParsedStyle {
    fn new(id: String) -> Self {
        Self {
            id,
            name: None,
            font_size: None,
        }
    }

    fn into_style(self) -> Style {
        let name = self.name.unwrap_or_else(|| self.id.clone());
        let mut style = Style::new(self.id, name);
        style.font_size = self.font_size;
        style
    }
}

/// Writer for styles.xml
pub struct StylesWriter;

impl StylesWriter {
    pub fn new() -> Self {
        Self
    }

    /// Generate styles.xml content from the registry.
    /// A "Normal" definition is always emitted so unstyled paragraphs
    /// resolve in word processors.
    pub fn write(&self, registry: &StyleRegistry) -> DocxResult<String> {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, namespaces::W));

        if registry.get(&StyleId::new("Normal")).is_none() {
            self.write_style(&mut xml, &Style::new("Normal", "Normal"));
        }

        let mut styles: Vec<&Style> = registry.iter().collect();
        styles.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        for style in styles {
            self.write_style(&mut xml, style);
        }

        xml.push_str("</w:styles>");
        Ok(xml)
    }

    fn write_style(&self, xml: &mut String, style: &Style) {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="{}">"#,
            quick_xml::escape::escape(style.id.as_str())
        ));
        xml.push_str(&format!(
            r#"<w:name w:val="{}"/>"#,
            quick_xml::escape::escape(style.name.as_str())
        ));
        if let Some(size) = style.font_size {
            xml.push_str(&format!(
                r#"<w:rPr><w:sz w:val="{}"/></w:rPr>"#,
                (size * 2.0).round() as i32
            ));
        }
        xml.push_str("</w:style>");
    }
}

impl Default for StylesWriter {
    fn default() -> Self {
        Self::new()
    }
}
