//! Style identifiers and the minimal style registry
//!
//! Only what the precision editor needs: a style's display name (heading
//! classification keys off it) and its font size (paragraph-level `size`
//! edits apply to the style, which affects every paragraph sharing it).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleId(pub String);

impl StyleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StyleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for StyleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named style definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub id: StyleId,
    /// Display name, e.g. "Heading 1" or "Normal"
    pub name: String,
    /// Font size in points, when the style sets one
    pub font_size: Option<f32>,
}

impl Style {
    pub fn new(id: impl Into<StyleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            font_size: None,
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }
}

/// Registry of style definitions for one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleRegistry {
    styles: HashMap<StyleId, Style>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style, replacing any existing definition with the same id
    pub fn register(&mut self, style: Style) {
        self.styles.insert(style.id.clone(), style);
    }

    pub fn get(&self, id: &StyleId) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Resolve a style's display name, falling back to the raw id
    pub fn display_name(&self, id: &StyleId) -> String {
        self.styles
            .get(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.as_str().to_string())
    }

    /// Set the font size on a style, creating the definition if needed.
    /// This is the document-wide path: every paragraph referencing the
    /// style picks up the new size.
    pub fn set_font_size(&mut self, id: &StyleId, size: f32) {
        let style = self
            .styles
            .entry(id.clone())
            .or_insert_with(|| Style::new(id.clone(), id.as_str()));
        style.font_size = Some(size);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_id() {
        let registry = StyleRegistry::new();
        assert_eq!(registry.display_name(&StyleId::new("Heading1")), "Heading1");
    }

    #[test]
    fn test_set_font_size_creates_definition() {
        let mut registry = StyleRegistry::new();
        registry.set_font_size(&StyleId::new("Normal"), 14.0);
        assert_eq!(
            registry.get(&StyleId::new("Normal")).unwrap().font_size,
            Some(14.0)
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = StyleRegistry::new();
        registry.register(Style::new("Heading1", "Heading 1"));
        registry.register(Style::new("Heading1", "Heading 1").with_font_size(16.0));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&StyleId::new("Heading1")).unwrap().font_size,
            Some(16.0)
        );
    }
}
