use pretty_assertions::assert_eq;
use tinct_tokens::{
    compute, reference, theme_to_token_source, EngineConfig, Theme, TokenDefinition, TokenEngine,
    TokenError, TokenSource, TokenValue, UnresolvedPolicy,
};

fn base() -> TokenSource {
    TokenSource::new("base", "Base")
        .with_token("colors", "primary", "221 83% 53%")
        .with_token("colors", "background", "0 0% 100%")
        .with_token("spacing", "unit", "4px")
        .with_token("spacing", "sm", compute!(Scale, "{spacing.unit}", 2))
}

fn child() -> TokenSource {
    TokenSource::new("child", "Child")
        .extending("base")
        .with_token("colors", "primary", "142 76% 36%")
}

fn engine() -> TokenEngine {
    let mut engine = TokenEngine::new();
    engine.register_all([base(), child()]);
    engine
}

#[test]
fn resolve_is_idempotent_and_cached() {
    let mut engine = engine();

    let first = engine.resolve("child").unwrap();
    let misses = engine.cache_stats().misses;
    let second = engine.resolve("child").unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.cache_stats().misses, misses);
    assert!(engine.cache_stats().hits >= 1);
}

#[test]
fn child_overrides_single_keys() {
    let mut engine = engine();
    let theme = engine.resolve_to_theme("child").unwrap();

    assert_eq!(theme.id, "child");
    assert_eq!(theme.name, "Child");
    assert_eq!(theme.get("colors.primary"), Some("142 76% 36%"));
    assert_eq!(theme.get("colors.background"), Some("0 0% 100%"));
}

#[test]
fn computed_tokens_resolve_and_inherit() {
    let mut engine = engine();
    assert_eq!(engine.resolve("base").unwrap()["spacing"]["sm"], "8px");
    assert_eq!(engine.resolve("child").unwrap()["spacing"]["sm"], "8px");
}

#[test]
fn child_inherits_results_not_formulas() {
    let mut engine = engine();
    engine.register(
        TokenSource::new("roomy", "Roomy")
            .extending("base")
            .with_token("spacing", "unit", "8px"),
    );

    let tokens = engine.resolve("roomy").unwrap();
    assert_eq!(tokens["spacing"]["unit"], "8px");
    // `sm` was computed against the parent's unit.
    assert_eq!(tokens["spacing"]["sm"], "8px");
}

#[test]
fn chained_references_resolve_in_any_order() {
    let mut engine = TokenEngine::new();
    engine.register(
        TokenSource::new("chain", "Chain")
            .with_token("colors", "a", reference("colors.b"))
            .with_token("colors", "b", reference("colors.c"))
            .with_token("colors", "c", "literal"),
    );

    let tokens = engine.resolve("chain").unwrap();
    assert_eq!(tokens["colors"]["a"], "literal");
    assert_eq!(tokens["colors"]["b"], "literal");
    assert_eq!(tokens["colors"]["c"], "literal");
}

#[test]
fn child_can_reference_parent_tokens() {
    let mut engine = engine();
    engine.register(
        TokenSource::new("ringed", "Ringed")
            .extending("child")
            .with_token("colors", "ring", reference("colors.primary"))
            .with_token("effects", "outline", "0 0 0 {spacing.unit} {colors.ring}"),
    );

    let tokens = engine.resolve("ringed").unwrap();
    assert_eq!(tokens["colors"]["ring"], "142 76% 36%");
    assert_eq!(tokens["effects"]["outline"], "0 0 0 4px 142 76% 36%");
}

#[test]
fn reregistering_parent_invalidates_children() {
    let mut engine = engine();
    engine.register(
        TokenSource::new("grandchild", "Grandchild")
            .extending("child")
            .with_token("spacing", "md", "12px"),
    );
    assert_eq!(
        engine.resolve("grandchild").unwrap()["colors"]["background"],
        "0 0% 100%"
    );
    assert!(engine.is_cached("child"));

    engine.register(base().with_token("colors", "background", "0 0% 4%"));

    assert!(!engine.is_cached("base"));
    assert!(!engine.is_cached("child"));
    assert!(!engine.is_cached("grandchild"));
    assert_eq!(
        engine.resolve("grandchild").unwrap()["colors"]["background"],
        "0 0% 4%"
    );
}

#[test]
fn changed_primary_reaches_child_after_reregister() {
    let mut engine = TokenEngine::new();
    engine.register(base());
    engine.register(TokenSource::new("child", "Child").extending("base"));
    assert_eq!(engine.resolve("child").unwrap()["colors"]["primary"], "221 83% 53%");

    engine.register(base().with_token("colors", "primary", "0 72% 51%"));

    assert_eq!(engine.resolve("child").unwrap()["colors"]["primary"], "0 72% 51%");
}

#[test]
fn invalidate_cache_cascades_to_descendants() {
    let mut engine = engine();
    engine.resolve("child").unwrap();
    assert!(engine.is_cached("base"));

    let invalidated = engine.invalidate_cache("base");
    assert_eq!(invalidated, vec!["base", "child"]);
    assert!(!engine.is_cached("base"));
    assert!(!engine.is_cached("child"));

    let misses = engine.cache_stats().misses;
    engine.resolve("child").unwrap();
    assert!(engine.cache_stats().misses > misses);
}

#[test]
fn unregister_invalidates_and_orphans_children() {
    let mut engine = engine();
    engine.resolve("child").unwrap();

    let removed = engine.unregister("base").unwrap();
    assert_eq!(removed.id, "base");
    assert!(!engine.is_cached("child"));
    assert_eq!(
        engine.resolve("child").unwrap_err(),
        TokenError::SourceNotFound {
            id: "base".to_string()
        }
    );
    assert!(engine.unregister("base").is_none());
}

#[test]
fn unknown_reference_fails_with_path() {
    let mut engine = TokenEngine::new();
    engine.register(
        TokenSource::new("broken", "Broken")
            .with_token("colors", "primary", reference("colors.doesNotExist")),
    );

    let err = engine.resolve("broken").unwrap_err();
    assert!(err.to_string().contains("colors.doesNotExist"));
    assert!(!engine.is_cached("broken"));
}

#[test]
fn unknown_source_fails() {
    let mut engine = engine();
    assert_eq!(
        engine.resolve("nope").unwrap_err(),
        TokenError::SourceNotFound {
            id: "nope".to_string()
        }
    );
    assert!(matches!(
        engine.resolve_to_theme("nope"),
        Err(TokenError::SourceNotFound { .. })
    ));
}

fn cyclic() -> TokenSource {
    TokenSource::new("cyclic", "Cyclic")
        .with_token("colors", "x", reference("colors.y"))
        .with_token("colors", "y", reference("colors.x"))
        .with_token("colors", "z", "#000000")
}

#[test]
fn reference_cycle_is_dropped_not_infinite() {
    let mut engine = TokenEngine::new();
    engine.register(cyclic());

    let report = engine.resolve_report("cyclic").unwrap();
    let colors = &report.tokens["colors"];
    assert!(!colors.contains_key("x"));
    assert!(!colors.contains_key("y"));
    assert_eq!(colors["z"], "#000000");
    assert_eq!(report.unresolved, vec!["colors.x", "colors.y"]);
}

#[test]
fn reference_cycle_fails_under_error_policy() {
    let mut engine = TokenEngine::with_config(EngineConfig {
        unresolved: UnresolvedPolicy::Error,
        ..EngineConfig::default()
    });
    engine.register(cyclic());

    assert_eq!(
        engine.resolve("cyclic").unwrap_err(),
        TokenError::Unresolved {
            source_id: "cyclic".to_string(),
            paths: vec!["colors.x".to_string(), "colors.y".to_string()],
        }
    );
}

fn long_chain(links: usize) -> TokenEngine {
    let mut engine = TokenEngine::new();
    engine.register(TokenSource::new("s0", "S0").with_token("spacing", "unit", "4px"));
    for i in 1..=links {
        engine.register(
            TokenSource::new(format!("s{i}"), format!("S{i}")).extending(format!("s{}", i - 1)),
        );
    }
    engine
}

#[test]
fn chain_length_guard_rejects_long_acyclic_chains() {
    let mut engine = long_chain(100);
    let err = engine.get_inheritance_chain("s100").unwrap_err();
    assert!(matches!(err, TokenError::CircularInheritance { ref id, .. } if id == "s100"));
    assert!(matches!(
        engine.resolve("s100"),
        Err(TokenError::CircularInheritance { .. })
    ));

    // 100 sources is still within bounds.
    assert_eq!(engine.get_inheritance_chain("s99").unwrap().len(), 100);
    assert_eq!(engine.resolve("s99").unwrap()["spacing"]["unit"], "4px");
}

#[test]
fn extends_cycle_is_rejected_before_resolving() {
    let mut engine = TokenEngine::new();
    engine.register(TokenSource::new("a", "A").extending("b"));
    engine.register(TokenSource::new("b", "B").extending("a"));

    assert!(matches!(
        engine.resolve("a"),
        Err(TokenError::CircularInheritance { .. })
    ));
    assert!(matches!(
        engine.inherits_from("a", "b"),
        Err(TokenError::CircularInheritance { .. })
    ));
}

#[test]
fn inheritance_queries() {
    let engine = engine();
    assert_eq!(engine.get_inheritance_chain("child").unwrap(), vec!["child", "base"]);
    assert!(engine.inherits_from("child", "base").unwrap());
    assert!(!engine.inherits_from("base", "child").unwrap());
}

#[test]
fn create_extension_registers_child() {
    let mut engine = engine();
    let mut overrides = TokenDefinition::new();
    overrides
        .entry("colors".to_string())
        .or_default()
        .insert("background".to_string(), TokenValue::from("0 0% 4%"));

    engine
        .create_extension("base", "base-dark", "Base Dark", overrides)
        .unwrap();

    let source = engine.get_source("base-dark").unwrap();
    assert_eq!(source.extends.as_deref(), Some("base"));
    let theme = engine.resolve_to_theme("base-dark").unwrap();
    assert_eq!(theme.get("colors.background"), Some("0 0% 4%"));
    assert_eq!(theme.get("colors.primary"), Some("221 83% 53%"));

    let err = engine
        .create_extension("missing", "x", "X", TokenDefinition::new())
        .unwrap_err();
    assert_eq!(
        err,
        TokenError::SourceNotFound {
            id: "missing".to_string()
        }
    );
    assert!(engine.get_source("x").is_none());
}

#[test]
fn imported_theme_round_trips_through_engine() {
    let imported = Theme::new("imported", "Imported")
        .with_token("colors", "primary", "#3b82f6")
        .with_token("colors", "ring", "{colors.primary}");

    let mut engine = engine();
    engine.register(theme_to_token_source(&imported, Some("base")));
    let theme = engine.resolve_to_theme("imported").unwrap();

    assert_eq!(theme.get("colors.ring"), Some("#3b82f6"));
    assert_eq!(theme.get("spacing.sm"), Some("8px"));
}

#[test]
fn get_all_sources_keeps_registration_order() {
    let engine = engine();
    let ids: Vec<_> = engine.get_all_sources().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["base", "child"]);
}

#[test]
fn engines_are_independent() {
    let mut a = engine();
    let mut b = TokenEngine::new();
    b.register(base().with_token("colors", "primary", "#000000"));

    assert_eq!(a.resolve("base").unwrap()["colors"]["primary"], "221 83% 53%");
    assert_eq!(b.resolve("base").unwrap()["colors"]["primary"], "#000000");
    assert!(b.get_source("child").is_none());
}
