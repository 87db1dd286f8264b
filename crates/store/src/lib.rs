//! Store - OOXML package persistence for the precision editor
//!
//! Reads and writes DOCX packages (a ZIP archive with the main content
//! stream at `word/document.xml`) and validates saved artifacts.

pub mod docx;
pub mod integrity;

pub use docx::{
    export_docx, export_docx_bytes, import_docx, import_docx_bytes, DocxError, DocxResult,
};
pub use integrity::{validate_package, IntegrityIssue, IntegrityVerdict};
