//! Saved-artifact integrity checking
//!
//! Validates that a saved package is a well-formed container and that its
//! main content stream parses as well-formed markup. This is a diagnostic,
//! not a guarantee of semantic correctness.

use crate::docx::DOCUMENT_PART;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Why an artifact failed validation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum IntegrityIssue {
    /// The file could not be read at all
    Io { message: String },
    /// The file is not a valid ZIP container
    NotAContainer { message: String },
    /// The container is missing its main content stream
    MissingPart { part: String },
    /// The main content stream is not well-formed XML
    MalformedMarkup { message: String },
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityIssue::Io { message } => write!(f, "cannot read file: {}", message),
            IntegrityIssue::NotAContainer { message } => {
                write!(f, "not a valid container: {}", message)
            }
            IntegrityIssue::MissingPart { part } => write!(f, "missing part: {}", part),
            IntegrityIssue::MalformedMarkup { message } => {
                write!(f, "malformed markup: {}", message)
            }
        }
    }
}

/// Verdict from validating a saved artifact
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "verdict")]
pub enum IntegrityVerdict {
    Pass,
    Fail { issue: IntegrityIssue },
}

impl IntegrityVerdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, IntegrityVerdict::Pass)
    }

    fn fail(issue: IntegrityIssue) -> Self {
        IntegrityVerdict::Fail { issue }
    }
}

impl std::fmt::Display for IntegrityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityVerdict::Pass => {
                write!(f, "PASS: container and document markup are valid")
            }
            IntegrityVerdict::Fail { issue } => write!(f, "FAIL: {}", issue),
        }
    }
}

/// Validate a saved package: container well-formedness, presence of the
/// main content stream, and markup well-formedness of that stream.
/// All failure modes fold into the verdict; this never panics or errors.
pub fn validate_package(path: &Path) -> IntegrityVerdict {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return IntegrityVerdict::fail(IntegrityIssue::Io {
                message: e.to_string(),
            })
        }
    };

    let mut archive = match ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(e) => {
            return IntegrityVerdict::fail(IntegrityIssue::NotAContainer {
                message: e.to_string(),
            })
        }
    };

    let mut content = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            if let Err(e) = part.read_to_string(&mut content) {
                return IntegrityVerdict::fail(IntegrityIssue::Io {
                    message: e.to_string(),
                });
            }
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return IntegrityVerdict::fail(IntegrityIssue::MissingPart {
                part: DOCUMENT_PART.to_string(),
            });
        }
        Err(e) => {
            return IntegrityVerdict::fail(IntegrityIssue::NotAContainer {
                message: e.to_string(),
            });
        }
    }

    if let Err(e) = check_markup(&content) {
        return IntegrityVerdict::fail(IntegrityIssue::MalformedMarkup { message: e });
    }

    tracing::debug!(path = %path.display(), "integrity check passed");
    IntegrityVerdict::Pass
}

/// Drive the XML reader over the whole stream, surfacing the first error
fn check_markup(content: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => return Ok(()),
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
        buf.clear();
    }
}
