//! Token source registry
//!
//! Holds every registered [`TokenSource`] by id, in registration order, and
//! answers inheritance queries over their `extends` links.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::tokens::TokenSource;
use crate::TokenError;

#[derive(Clone, Debug, Default)]
pub struct SourceRegistry {
    sources: IndexMap<String, TokenSource>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a source by id, returning the replaced one.
    pub fn insert(&mut self, source: TokenSource) -> Option<TokenSource> {
        self.sources.insert(source.id.clone(), source)
    }

    pub fn remove(&mut self, id: &str) -> Option<TokenSource> {
        self.sources.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&TokenSource> {
        self.sources.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenSource> {
        self.sources.values()
    }

    /// Ids of sources that directly extend `id`.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.sources
            .values()
            .filter(move |source| source.extends.as_deref() == Some(id))
            .map(|source| source.id.as_str())
    }

    /// Walk `extends` links upward from `id`: self first, root last.
    ///
    /// An unregistered `id` yields an empty chain, and the walk stops at the
    /// first parent that is not registered. Revisiting an id, or a chain longer
    /// than `max_depth`, fails with [`TokenError::CircularInheritance`]; the
    /// length bound applies even when the chain is acyclic.
    pub fn inheritance_chain(&self, id: &str, max_depth: usize) -> Result<Vec<String>, TokenError> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = self.sources.get(id);

        while let Some(source) = current {
            if !seen.insert(source.id.as_str()) {
                chain.push(source.id.clone());
                return Err(TokenError::CircularInheritance {
                    id: id.to_string(),
                    chain,
                });
            }
            chain.push(source.id.clone());
            if chain.len() > max_depth {
                return Err(TokenError::CircularInheritance {
                    id: id.to_string(),
                    chain,
                });
            }
            current = source
                .extends
                .as_deref()
                .and_then(|parent| self.sources.get(parent));
        }

        Ok(chain)
    }

    /// Whether `ancestor_id` appears anywhere in `id`'s chain (including `id` itself).
    pub fn inherits_from(
        &self,
        id: &str,
        ancestor_id: &str,
        max_depth: usize,
    ) -> Result<bool, TokenError> {
        Ok(self
            .inheritance_chain(id, max_depth)?
            .iter()
            .any(|link| link == ancestor_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(links: &[(&str, Option<&str>)]) -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        for (id, parent) in links {
            let mut source = TokenSource::new(*id, *id);
            source.extends = parent.map(str::to_string);
            registry.insert(source);
        }
        registry
    }

    #[test]
    fn chain_runs_self_to_root() {
        let reg = registry(&[("base", None), ("brand", Some("base")), ("dark", Some("brand"))]);
        assert_eq!(reg.inheritance_chain("dark", 100).unwrap(), vec!["dark", "brand", "base"]);
        assert_eq!(reg.inheritance_chain("base", 100).unwrap(), vec!["base"]);
        assert!(reg.inheritance_chain("missing", 100).unwrap().is_empty());
    }

    #[test]
    fn chain_stops_at_unregistered_parent() {
        let reg = registry(&[("orphan", Some("gone"))]);
        assert_eq!(reg.inheritance_chain("orphan", 100).unwrap(), vec!["orphan"]);
    }

    #[test]
    fn true_cycle_is_detected_immediately() {
        let reg = registry(&[("a", Some("b")), ("b", Some("a"))]);
        let err = reg.inheritance_chain("a", 100).unwrap_err();
        assert_eq!(
            err,
            TokenError::CircularInheritance {
                id: "a".to_string(),
                chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
            }
        );
    }

    #[test]
    fn self_extension_is_a_cycle() {
        let reg = registry(&[("loop", Some("loop"))]);
        assert!(matches!(
            reg.inheritance_chain("loop", 100),
            Err(TokenError::CircularInheritance { .. })
        ));
    }

    #[test]
    fn inherits_from_checks_whole_chain() {
        let reg = registry(&[("base", None), ("brand", Some("base")), ("other", None)]);
        assert!(reg.inherits_from("brand", "base", 100).unwrap());
        assert!(reg.inherits_from("brand", "brand", 100).unwrap());
        assert!(!reg.inherits_from("brand", "other", 100).unwrap());
    }

    #[test]
    fn children_are_direct_only() {
        let reg = registry(&[("base", None), ("a", Some("base")), ("b", Some("a"))]);
        assert_eq!(reg.children_of("base").collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn remove_keeps_registration_order() {
        let mut reg = registry(&[("a", None), ("b", None), ("c", None)]);
        reg.remove("b");
        let ids: Vec<_> = reg.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
