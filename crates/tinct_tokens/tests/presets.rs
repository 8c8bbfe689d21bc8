use tinct_tokens::presets::BASE_ID;
use tinct_tokens::{preset_sources, Theme, ThemePreset, TokenEngine};

fn themes(preset: ThemePreset) -> (Theme, Theme) {
    let mut engine = TokenEngine::new();
    engine.register_all(preset_sources(preset));
    let light = engine.resolve_to_theme(preset.id()).unwrap();
    let dark = engine.resolve_to_theme(&preset.dark_id()).unwrap();
    (light, dark)
}

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["neutral", "slate", "zinc"]);
    assert_eq!(ThemePreset::from_id("slate"), Some(ThemePreset::Slate));
    assert_eq!(ThemePreset::from_id("rose"), None);
}

#[test]
fn preset_sources_chain_through_base() {
    for &preset in ThemePreset::all() {
        let mut engine = TokenEngine::new();
        engine.register_all(preset_sources(preset));
        assert_eq!(
            engine.get_inheritance_chain(&preset.dark_id()).unwrap(),
            vec![preset.dark_id(), preset.id().to_string(), BASE_ID.to_string()]
        );
    }
}

#[test]
fn presets_resolve_without_dropped_tokens() {
    for &preset in ThemePreset::all() {
        let mut engine = TokenEngine::new();
        engine.register_all(preset_sources(preset));
        for id in [BASE_ID.to_string(), preset.id().to_string(), preset.dark_id()] {
            let report = engine.resolve_report(&id).unwrap();
            assert!(
                report.unresolved.is_empty(),
                "preset={preset:?} source={id} unresolved={:?}",
                report.unresolved
            );
        }
    }
}

#[test]
fn shadcn_like_presets_have_distinct_light_and_dark_primary() {
    for &preset in ThemePreset::all() {
        let (light, dark) = themes(preset);
        assert_ne!(
            light.get("colors.primary"),
            dark.get("colors.primary"),
            "Preset {:?} should have distinct light/dark primary colors",
            preset
        );
        assert_ne!(
            light.get("colors.primary-hover"),
            light.get("colors.primary"),
            "Preset {:?} should derive a distinct hover color",
            preset
        );
    }
}

#[test]
fn shadcn_like_presets_use_expected_radii() {
    for &preset in ThemePreset::all() {
        let (light, dark) = themes(preset);
        for theme in [&light, &dark] {
            assert_eq!(theme.get("borderRadius.md"), Some("10px"), "preset={preset:?}");
            assert_eq!(theme.get("borderRadius.sm"), Some("6px"), "preset={preset:?}");
            assert_eq!(theme.get("borderRadius.lg"), Some("14px"), "preset={preset:?}");
            assert_eq!(theme.get("borderRadius.3xl"), Some("26px"), "preset={preset:?}");
        }
    }
}

#[test]
fn shadcn_like_presets_use_readable_selection_text() {
    for &preset in ThemePreset::all() {
        let (light, dark) = themes(preset);
        for theme in [light, dark] {
            assert_eq!(
                theme.get("colors.selection-text"),
                theme.get("colors.text-primary"),
                "preset={preset:?} theme={}",
                theme.id
            );
        }
    }
}

#[test]
fn base_scale_is_computed() {
    let (light, _) = themes(ThemePreset::Neutral);
    assert_eq!(light.get("spacing.2"), Some("8px"));
    assert_eq!(light.get("spacing.16"), Some("64px"));
    assert_eq!(light.get("typography.size-sm"), Some("14px"));
    assert_eq!(light.get("opacity.disabled"), Some("0.6"));
    assert_eq!(light.get("effects.disabled-opacity"), Some("0.6"));
}

#[test]
fn dark_effects_follow_dark_colors() {
    let (light, dark) = themes(ThemePreset::Zinc);
    assert_eq!(light.get("effects.focus-ring"), Some("0 0 0 2px #09090b"));
    assert_eq!(dark.get("effects.focus-ring"), Some("0 0 0 2px #d4d4d8"));
}
