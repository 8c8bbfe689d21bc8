//! Token sources and token tables

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::TokenValue;

/// key -> value within one category
pub type TokenMap = IndexMap<String, TokenValue>;

/// category -> key -> value. Categories are open-ended; unknown ones pass through.
pub type TokenDefinition = IndexMap<String, TokenMap>;

/// key -> concrete value within one category
pub type ResolvedCategory = IndexMap<String, String>;

/// category -> key -> concrete value
pub type ResolvedTokens = IndexMap<String, ResolvedCategory>;

/// One theme or brand: a named bundle of token definitions that may extend another.
///
/// Sources are replaced wholesale by re-registering; mutating `tokens` of a
/// registered source in place bypasses cache invalidation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenSource {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub tokens: TokenDefinition,
}

impl TokenSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extends: None,
            tokens: TokenDefinition::new(),
        }
    }

    /// Set the parent source id.
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Add or replace a single token.
    pub fn with_token(
        mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<TokenValue>,
    ) -> Self {
        self.tokens
            .entry(category.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Add or replace a whole category.
    pub fn with_category(mut self, category: impl Into<String>, tokens: TokenMap) -> Self {
        self.tokens.insert(category.into(), tokens);
        self
    }

    pub fn token(&self, category: &str, key: &str) -> Option<&TokenValue> {
        self.tokens.get(category)?.get(key)
    }
}

/// Split a dot-path into `(category, key)`.
///
/// Only the first `.` separates; the key keeps any further dots, so
/// `typography.fontSize.base` names key `fontSize.base` in `typography`.
pub fn split_path(path: &str) -> Option<(&str, &str)> {
    let (category, key) = path.trim().split_once('.')?;
    if category.is_empty() || key.is_empty() {
        return None;
    }
    Some((category, key))
}

/// Look up a concrete value by dot-path.
pub fn lookup_resolved<'a>(tokens: &'a ResolvedTokens, path: &str) -> Option<&'a str> {
    let (category, key) = split_path(path)?;
    tokens.get(category)?.get(key).map(String::as_str)
}

/// Whether a token is declared at `path`, resolved or not.
pub fn is_declared(tokens: &TokenDefinition, path: &str) -> bool {
    split_path(path)
        .and_then(|(category, key)| tokens.get(category)?.get(key))
        .is_some()
}

/// Turn resolved values back into literal definitions.
///
/// Used for inheritance: a child sees its parent's computed results, never the
/// parent's formulas.
pub fn flatten_resolved(tokens: &ResolvedTokens) -> TokenDefinition {
    tokens
        .iter()
        .map(|(category, values)| {
            let values = values
                .iter()
                .map(|(key, value)| (key.clone(), TokenValue::from(value.as_str())))
                .collect();
            (category.clone(), values)
        })
        .collect()
}

/// Merge `overrides` onto `base` per category, per key. Overriding keys win;
/// keys only in `base` are kept.
pub fn merge_definitions(base: &mut TokenDefinition, overrides: &TokenDefinition) {
    for (category, values) in overrides {
        let target = base.entry(category.clone()).or_default();
        for (key, value) in values {
            target.insert(key.clone(), value.clone());
        }
    }
}
