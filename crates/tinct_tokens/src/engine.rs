//! Token resolution engine
//!
//! [`TokenEngine`] owns a [`SourceRegistry`] and a [`ResolutionCache`]. Resolving
//! a source:
//!
//! 1. returns the cached result if there is one;
//! 2. resolves the parent (if any) and flattens its result back into literal
//!    definitions, so a child inherits computed *values*, never formulas;
//! 3. merges the child's own tokens over the parent's, per category and key;
//! 4. reduces the merged table with [`resolve_all_tokens`];
//! 5. caches the result.
//!
//! Registering or unregistering a source evicts its cache entry and the entry
//! of every source that inherits from it.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::cache::{CacheStats, ResolutionCache};
use crate::config::{EngineConfig, UnresolvedPolicy};
use crate::expr::{contains_reference, is_plain_literal, Scope};
use crate::registry::SourceRegistry;
use crate::theme::Theme;
use crate::tokens::*;
use crate::TokenError;

/// Called with every invalidated source id after a registry change.
pub type InvalidationListener = Box<dyn FnMut(&[String]) + Send>;

/// Outcome of resolving one source
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub tokens: ResolvedTokens,
    /// Dot-paths still holding references after the pass budget, in declaration order.
    /// Always empty under [`UnresolvedPolicy::Error`], which fails instead.
    pub unresolved: Vec<String>,
}

pub struct TokenEngine {
    config: EngineConfig,
    registry: SourceRegistry,
    cache: ResolutionCache,
    listener: Option<InvalidationListener>,
}

impl Default for TokenEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl TokenEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            registry: SourceRegistry::new(),
            cache: ResolutionCache::new(),
            listener: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration. Cached results are dropped since the pass
    /// budget and policy affect them.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.cache.clear();
    }

    pub fn set_invalidation_listener(&mut self, listener: impl FnMut(&[String]) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    // ========== Registry ==========

    /// Insert or replace a source by id.
    pub fn register(&mut self, source: TokenSource) {
        let id = source.id.clone();
        let replaced = self.registry.insert(source).is_some();
        debug!(source = %id, replaced, "registered token source");
        self.invalidate_cache(&id);
    }

    /// Register in iteration order, returning the ids.
    pub fn register_all(&mut self, sources: impl IntoIterator<Item = TokenSource>) -> Vec<String> {
        sources
            .into_iter()
            .map(|source| {
                let id = source.id.clone();
                self.register(source);
                id
            })
            .collect()
    }

    /// Remove a source. Sources extending it stay registered but will fail to
    /// resolve until their parent is registered again.
    pub fn unregister(&mut self, id: &str) -> Option<TokenSource> {
        let removed = self.registry.remove(id)?;
        debug!(source = %id, "unregistered token source");
        self.invalidate_cache(id);
        Some(removed)
    }

    pub fn get_source(&self, id: &str) -> Option<&TokenSource> {
        self.registry.get(id)
    }

    /// All sources in registration order.
    pub fn get_all_sources(&self) -> Vec<&TokenSource> {
        self.registry.iter().collect()
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Ids from `id` up to its root, self first.
    pub fn get_inheritance_chain(&self, id: &str) -> Result<Vec<String>, TokenError> {
        self.registry
            .inheritance_chain(id, self.config.max_chain_depth)
    }

    pub fn inherits_from(&self, id: &str, ancestor_id: &str) -> Result<bool, TokenError> {
        self.registry
            .inherits_from(id, ancestor_id, self.config.max_chain_depth)
    }

    /// Register a new source extending `parent_id` with the given overrides.
    pub fn create_extension(
        &mut self,
        parent_id: &str,
        new_id: impl Into<String>,
        name: impl Into<String>,
        overrides: TokenDefinition,
    ) -> Result<(), TokenError> {
        if !self.registry.contains(parent_id) {
            return Err(TokenError::SourceNotFound {
                id: parent_id.to_string(),
            });
        }
        let mut source = TokenSource::new(new_id, name).extending(parent_id);
        source.tokens = overrides;
        debug!(source = %source.id, parent = parent_id, "creating extension");
        self.register(source);
        Ok(())
    }

    // ========== Resolution ==========

    /// Resolve a source to concrete values.
    pub fn resolve(&mut self, source_id: &str) -> Result<ResolvedTokens, TokenError> {
        Ok(self.resolve_report(source_id)?.tokens.clone())
    }

    /// Resolve a source, also reporting tokens dropped as unresolved.
    pub fn resolve_report(&mut self, source_id: &str) -> Result<Arc<Resolution>, TokenError> {
        if let Some(hit) = self.cache.get(source_id) {
            trace!(source = source_id, "token cache hit");
            return Ok(hit);
        }

        let parent_id = self
            .registry
            .get(source_id)
            .ok_or_else(|| TokenError::SourceNotFound {
                id: source_id.to_string(),
            })?
            .extends
            .clone();

        // Rejects cyclic `extends` before recursing into parents.
        let chain = self.get_inheritance_chain(source_id)?;
        debug!(source = source_id, ?chain, "resolving token source");

        let mut merged = match parent_id.as_deref() {
            Some(parent_id) => {
                if !self.registry.contains(parent_id) {
                    return Err(TokenError::SourceNotFound {
                        id: parent_id.to_string(),
                    });
                }
                let parent = self.resolve_report(parent_id)?;
                flatten_resolved(&parent.tokens)
            }
            None => TokenDefinition::new(),
        };

        let source = self
            .registry
            .get(source_id)
            .ok_or_else(|| TokenError::SourceNotFound {
                id: source_id.to_string(),
            })?;
        merge_definitions(&mut merged, &source.tokens);

        let resolution = resolve_all_tokens(&merged, self.config.max_passes)?;
        if !resolution.unresolved.is_empty() {
            match self.config.unresolved {
                UnresolvedPolicy::Drop => {
                    for path in &resolution.unresolved {
                        warn!(source = source_id, %path, "dropping unresolved token");
                    }
                }
                UnresolvedPolicy::Error => {
                    return Err(TokenError::Unresolved {
                        source_id: source_id.to_string(),
                        paths: resolution.unresolved,
                    });
                }
            }
        }

        let resolution = Arc::new(resolution);
        self.cache.insert(source_id, Arc::clone(&resolution));
        Ok(resolution)
    }

    /// Resolve a source into a flat [`Theme`] for exporters and mappers.
    pub fn resolve_to_theme(&mut self, source_id: &str) -> Result<Theme, TokenError> {
        let resolution = self.resolve_report(source_id)?;
        let name = self
            .registry
            .get(source_id)
            .map(|source| source.name.clone())
            .unwrap_or_default();
        Ok(Theme::from_resolved(source_id, name, &resolution.tokens))
    }

    // ========== Cache ==========

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn is_cached(&self, source_id: &str) -> bool {
        self.cache.contains(source_id)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Evict `id` and every registered source inheriting from it, returning the visited ids.
    pub fn invalidate_cache(&mut self, id: &str) -> Vec<String> {
        let invalidated = self.cache.invalidate(id, &self.registry);
        debug!(source = id, ?invalidated, "invalidated token cache");
        if let Some(listener) = self.listener.as_mut() {
            listener(&invalidated);
        }
        invalidated
    }
}

/// Reduce a merged definition to concrete values.
///
/// Stage A copies plain literals straight through. Stage B then makes up to
/// `max_passes` passes over the remaining tokens, evaluating each against the
/// values resolved so far and committing those that produce a literal; it
/// stops early once a pass commits nothing. Chained references resolve in any
/// declaration order, while reference cycles simply never commit and are
/// returned in [`Resolution::unresolved`].
///
/// A reference to a path that is not declared anywhere in `merged` fails
/// immediately with [`TokenError::ReferenceNotFound`].
pub fn resolve_all_tokens(
    merged: &TokenDefinition,
    max_passes: usize,
) -> Result<Resolution, TokenError> {
    let mut resolved = ResolvedTokens::with_capacity(merged.len());
    let mut pending: Vec<(&str, &str, &TokenValue)> = Vec::new();

    for (category, values) in merged {
        let out = resolved.entry(category.clone()).or_default();
        for (key, value) in values {
            match value.as_literal() {
                Some(literal) if is_plain_literal(value) => {
                    out.insert(key.clone(), literal.to_token_string());
                }
                _ => pending.push((category.as_str(), key.as_str(), value)),
            }
        }
    }

    let mut pass = 0;
    while !pending.is_empty() && pass < max_passes {
        pass += 1;
        let before = pending.len();
        let mut still_pending = Vec::with_capacity(before);

        for (category, key, value) in pending {
            let scope = Scope {
                resolved: &resolved,
                declared: Some(merged),
            };
            match scope.evaluate(value)? {
                Some(result) if !contains_reference(&result) => {
                    if let Some(out) = resolved.get_mut(category) {
                        out.insert(key.to_string(), result);
                    }
                }
                _ => still_pending.push((category, key, value)),
            }
        }

        pending = still_pending;
        trace!(
            pass,
            committed = before - pending.len(),
            pending = pending.len(),
            "fixed-point pass"
        );
        if pending.len() == before {
            break;
        }
    }

    // Stage B commits out of order; restore declaration order.
    let mut tokens = ResolvedTokens::with_capacity(merged.len());
    for (category, values) in merged {
        let mut done = resolved.swap_remove(category.as_str()).unwrap_or_default();
        let ordered = values
            .keys()
            .filter_map(|key| {
                done.swap_remove(key.as_str())
                    .map(|value| (key.clone(), value))
            })
            .collect();
        tokens.insert(category.clone(), ordered);
    }

    let unresolved = pending
        .iter()
        .map(|(category, key, _)| format!("{category}.{key}"))
        .collect();

    Ok(Resolution { tokens, unresolved })
}
