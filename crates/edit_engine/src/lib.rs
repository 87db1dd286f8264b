//! Edit Engine - structure mapping and identifier-addressed mutation
//!
//! The two cooperating halves of the precision editor:
//!
//! - the **structure mapper** walks the live document tree into a nested
//!   outline (sections → headings → paragraphs → runs, plus a flat table
//!   list) and mints a generation-scoped identifier table that resolves
//!   each identifier back to a live node handle;
//! - the **editor session** resolves identifiers through the current table
//!   and performs single-shot tree surgery: text replacement, sibling
//!   insertion, deletion, and formatting.
//!
//! Identifiers are positional (`p3`, `p3_r0`, `t1`) and valid only against
//! the map generation that produced them; any structural edit invalidates
//! the table, and the session regenerates it before the next resolution.

mod error;
mod mapper;
mod session;

pub use error::{EditError, EditResult};
pub use mapper::{
    generate_map, ContentNode, DocumentMap, ElementHandle, HeadingNode, IdentifierTable,
    MapMetadata, RunDescriptor, Section, TableSummary, PREVIEW_GRAPHEMES,
};
pub use session::{EditOutcome, EditorSession, SessionOptions};
