//! DOCX Import/Export Module
//!
//! A DOCX file is a ZIP archive containing XML parts:
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `word/document.xml` - Main document content
//! - `word/styles.xml` - Style definitions

mod api;
mod document;
mod document_writer;
mod error;
mod reader;
mod styles;
mod writer;

pub use api::{export_docx, export_docx_bytes, import_docx, import_docx_bytes};
pub use error::{DocxError, DocxResult};
pub(crate) use reader::{DocxReader, XmlParser};

/// Path of the main content stream inside the package
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Path of the styles part inside the package
pub const STYLES_PART: &str = "word/styles.xml";

/// XML namespaces used in DOCX files
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// Package relationships namespace
    pub const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    /// Content types namespace
    pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
}
