//! Text run node - a contiguous span of text with consistent formatting

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// Character formatting overrides on a run.
/// `None` means "inherits from the style, not explicitly set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterProperties {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// Font size in points
    pub font_size: Option<f32>,
}

impl CharacterProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no override is set
    pub fn is_empty(&self) -> bool {
        self.bold.is_none() && self.italic.is_none() && self.font_size.is_none()
    }
}

/// A text run - the smallest formatting-addressable unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    id: NodeId,
    /// The text content of this run
    pub text: String,
    /// Direct formatting overrides
    pub props: CharacterProperties,
}

impl Run {
    /// Create a new run with text content
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            text: text.into(),
            props: CharacterProperties::default(),
        }
    }

    /// Create a new run with text and formatting overrides
    pub fn with_props(text: impl Into<String>, props: CharacterProperties) -> Self {
        Self {
            id: NodeId::new(),
            text: text.into(),
            props,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_empty() {
        assert!(CharacterProperties::default().is_empty());
        let props = CharacterProperties {
            bold: Some(false),
            ..Default::default()
        };
        // An explicit `false` is still an override
        assert!(!props.is_empty());
    }

    #[test]
    fn test_run_ids_unique() {
        assert_ne!(Run::new("a").id(), Run::new("a").id());
    }
}
