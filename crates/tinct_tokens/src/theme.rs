//! Flat theme shape consumed by exporters and library mappers
//!
//! A [`Theme`] is what the import pipeline produces and what consumers receive
//! from [`TokenEngine::resolve_to_theme`](crate::TokenEngine::resolve_to_theme):
//! an id, a name, and one string table per category, with categories
//! serialized at the top level (`{"id": ..., "name": ..., "colors": {...}}`).

use serde::{Deserialize, Serialize};

use crate::tokens::{lookup_resolved, ResolvedCategory, ResolvedTokens, TokenSource, TokenValue};

/// Well-known category names
pub mod category {
    pub const COLORS: &str = "colors";
    pub const SPACING: &str = "spacing";
    pub const TYPOGRAPHY: &str = "typography";
    pub const BORDER_RADIUS: &str = "borderRadius";
    pub const SHADOWS: &str = "shadows";
    pub const EFFECTS: &str = "effects";
    pub const OPACITY: &str = "opacity";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub categories: ResolvedTokens,
}

impl Theme {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            categories: ResolvedTokens::new(),
        }
    }

    pub fn from_resolved(
        id: impl Into<String>,
        name: impl Into<String>,
        tokens: &ResolvedTokens,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            categories: tokens.clone(),
        }
    }

    pub fn with_token(
        mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn category(&self, name: &str) -> Option<&ResolvedCategory> {
        self.categories.get(name)
    }

    /// Look up a value by dot-path, e.g. `colors.primary`.
    pub fn get(&self, path: &str) -> Option<&str> {
        lookup_resolved(&self.categories, path)
    }

    pub fn colors(&self) -> Option<&ResolvedCategory> {
        self.category(category::COLORS)
    }

    pub fn spacing(&self) -> Option<&ResolvedCategory> {
        self.category(category::SPACING)
    }

    pub fn typography(&self) -> Option<&ResolvedCategory> {
        self.category(category::TYPOGRAPHY)
    }

    pub fn border_radius(&self) -> Option<&ResolvedCategory> {
        self.category(category::BORDER_RADIUS)
    }

    pub fn shadows(&self) -> Option<&ResolvedCategory> {
        self.category(category::SHADOWS)
    }

    pub fn effects(&self) -> Option<&ResolvedCategory> {
        self.category(category::EFFECTS)
    }

    pub fn opacity(&self) -> Option<&ResolvedCategory> {
        self.category(category::OPACITY)
    }
}

/// Convert an imported theme into a registrable source.
///
/// Values become string literals; any `{path}` syntax they contain is resolved
/// as an inline reference once the source is registered.
pub fn theme_to_token_source(theme: &Theme, extends: Option<&str>) -> TokenSource {
    let mut source = TokenSource::new(theme.id.clone(), theme.name.clone());
    source.extends = extends.map(str::to_string);
    source.tokens = theme
        .categories
        .iter()
        .map(|(category, values)| {
            let values = values
                .iter()
                .map(|(key, value)| (key.clone(), TokenValue::from(value.as_str())))
                .collect();
            (category.clone(), values)
        })
        .collect();
    source
}
