//! Stylesheet system for chart colour palettes
//!
//! Cards, badges and connector lines are drawn with symbolic colour tokens
//! (`card-background`, `line-add`, ...). A stylesheet maps tokens to concrete
//! colours; tokens it leaves out fall back to the built-in palette.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> hex color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Built-in palette
const DEFAULT_PALETTE: &[(&str, &str)] = &[
    // Member cards
    ("card-background", "#ffffff"),
    ("card-border", "#e1e1e1"),
    ("hover-border", "#667eea"),
    // Vacancies and people on their way out
    ("vacancy-background", "#fee2e2"),
    ("vacancy-border", "#ef4444"),
    ("inactive-background", "#fef3c7"),
    ("inactive-border", "#fbbf24"),
    ("inactive-text", "#92400e"),
    // Avatars and badges
    ("avatar-root", "#0078d4"),
    ("avatar", "#5b5fc7"),
    ("lead-badge", "#f59e0b"),
    // Text
    ("text-primary", "#242424"),
    ("text-secondary", "#6b7280"),
    ("text-light", "#ffffff"),
    // Add member slots
    ("add-slot", "#667eea"),
    ("add-slot-border", "#ffffff"),
    // Connector lines
    ("line", "#c8c6c4"),
    ("line-add", "#667eea"),
    // Guard placeholders
    ("cycle-background", "#ffeeee"),
    ("cycle-border", "#ff0000"),
    ("depth-background", "#fff3cd"),
    ("depth-border", "#ffc107"),
    // Stack view
    ("stack-root", "#667eea"),
    ("stack-manager", "#f5576c"),
];

/// Fallback for tokens missing from both the stylesheet and the palette
const FALLBACK_COLOR: &str = "#333333";

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a token, falling back to the built-in palette
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }
        DEFAULT_PALETTE
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, color)| *color)
            .unwrap_or(FALLBACK_COLOR)
            .to_string()
    }

    /// Every palette token with its resolved colour, plus any extra tokens
    /// this stylesheet defines, sorted by token
    pub fn palette(&self) -> Vec<(String, String)> {
        let mut merged: HashMap<&str, &str> = DEFAULT_PALETTE.iter().copied().collect();
        merged.extend(self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let mut palette: Vec<(String, String)> = merged
            .into_iter()
            .map(|(token, color)| (token.to_string(), color.to_string()))
            .collect();
        palette.sort();
        palette
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Stylesheet {
            name: Some("default".to_string()),
            description: None,
            colors: DEFAULT_PALETTE
                .iter()
                .map(|(token, color)| (token.to_string(), color.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert!(stylesheet.colors.contains_key("card-background"));
        assert!(stylesheet.colors.contains_key("line"));
        assert!(stylesheet.colors.contains_key("line-add"));
    }

    #[test]
    fn test_resolve_existing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("line"), Some("#c8c6c4"));
        assert_eq!(stylesheet.resolve("line-add"), Some("#667eea"));
    }

    #[test]
    fn test_resolve_missing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("nonexistent"), None);
    }

    #[test]
    fn test_partial_stylesheet_falls_back() {
        let stylesheet = Stylesheet::from_str(
            r##"
[colors]
line = "#000000"
"##,
        )
        .expect("Should parse");
        assert_eq!(stylesheet.resolve_or_default("line"), "#000000");
        assert_eq!(stylesheet.resolve_or_default("vacancy-border"), "#ef4444");
        assert_eq!(stylesheet.resolve_or_default("unknown-token"), "#333333");
    }

    #[test]
    fn test_palette_merges_overrides() {
        let stylesheet = Stylesheet::from_str(
            r##"
[colors]
line = "#000000"
brand = "#123456"
"##,
        )
        .unwrap();
        let palette = stylesheet.palette();
        assert_eq!(palette.len(), DEFAULT_PALETTE.len() + 1);
        assert!(palette.contains(&("line".to_string(), "#000000".to_string())));
        assert!(palette.contains(&("brand".to_string(), "#123456".to_string())));
        assert!(palette.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Dark"
description = "Dark cards"

[colors]
card-background = "#1f2937"
"##;
        let stylesheet = Stylesheet::from_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Dark".to_string()));
        assert_eq!(stylesheet.description, Some("Dark cards".to_string()));
        assert_eq!(stylesheet.resolve("card-background"), Some("#1f2937"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Stylesheet::from_str(invalid);
        assert!(matches!(result, Err(StylesheetError::ParseError(_))));
    }
}
