//! Built-in theme presets inspired by shadcn base color presets.
//!
//! Every preset is a pair of sources: a light source extending [`BASE_ID`] and
//! a dark source extending the light one. State colors (hover, active, subtle
//! backgrounds) are `$compute` tokens over the palette, so the dark source
//! re-declares them: it inherits the light source's computed results, not its
//! formulas. Effects that embed colors are re-declared for the same reason.

use std::fmt::{Display, Formatter};

use crate::compute;
use crate::theme::category;
use crate::tokens::{reference, TokenMap, TokenSource, TokenValue};

/// Id of the shared source holding spacing, radii, typography and opacity.
pub const BASE_ID: &str = "tinct-base";

/// Built-in preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// shadcn-inspired neutral preset.
    Neutral,
    /// shadcn-inspired slate preset.
    Slate,
    /// shadcn-inspired zinc preset.
    Zinc,
}

impl ThemePreset {
    /// Stable preset id, also the id of the light source.
    pub fn id(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
        }
    }

    /// Id of the dark source.
    pub fn dark_id(self) -> String {
        format!("{}-dark", self.id())
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Slate => "Slate",
            Self::Zinc => "Zinc",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 3] =
            [ThemePreset::Neutral, ThemePreset::Slate, ThemePreset::Zinc];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|preset| preset.id() == id)
    }

    /// Light and dark sources for this preset, light first.
    pub fn sources(self) -> [TokenSource; 2] {
        let (light, dark) = match self {
            Self::Neutral => (neutral_light(), neutral_dark()),
            Self::Slate => (slate_light(), slate_dark()),
            Self::Zinc => (zinc_light(), zinc_dark()),
        };
        let name = self.display_name();

        [
            TokenSource::new(self.id(), name)
                .extending(BASE_ID)
                .with_category(category::COLORS, build_colors(light, Scheme::Light))
                .with_category(category::EFFECTS, build_effects()),
            TokenSource::new(self.dark_id(), format!("{name} Dark"))
                .extending(self.id())
                .with_category(category::COLORS, build_colors(dark, Scheme::Dark))
                .with_category(category::EFFECTS, build_effects()),
        ]
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The base source, followed by the light and dark sources of `preset`.
///
/// Register them in this order; each extends the one before it.
pub fn preset_sources(preset: ThemePreset) -> Vec<TokenSource> {
    let mut sources = vec![base_source()];
    sources.extend(preset.sources());
    sources
}

/// Shared non-color tokens: a 4px spacing scale, radii around an 8px default,
/// a 16px type scale, and the disabled opacity.
pub fn base_source() -> TokenSource {
    let mut spacing = TokenMap::new();
    spacing.insert("unit".into(), "4px".into());
    for step in [1, 2, 3, 4, 6, 8, 12, 16] {
        spacing.insert(step.to_string(), compute!(Scale, "{spacing.unit}", step));
    }

    let mut radii = TokenMap::new();
    radii.insert("none".into(), "0px".into());
    radii.insert("default".into(), "8px".into());
    radii.insert("sm".into(), compute!(Subtract, "{borderRadius.default}", 2));
    radii.insert("md".into(), compute!(Add, "{borderRadius.default}", 2));
    radii.insert("lg".into(), compute!(Add, "{borderRadius.default}", 6));
    radii.insert("xl".into(), compute!(Add, "{borderRadius.lg}", 4));
    radii.insert("2xl".into(), compute!(Add, "{borderRadius.xl}", 4));
    radii.insert("3xl".into(), compute!(Add, "{borderRadius.2xl}", 4));
    radii.insert("full".into(), "9999px".into());

    let mut typography = TokenMap::new();
    typography.insert(
        "font-sans".into(),
        "Inter, system-ui, -apple-system, sans-serif".into(),
    );
    typography.insert("font-mono".into(), "JetBrains Mono, ui-monospace, monospace".into());
    typography.insert("size-base".into(), "16px".into());
    typography.insert("size-xs".into(), compute!(Scale, "{typography.size-base}", 0.75));
    typography.insert("size-sm".into(), compute!(Scale, "{typography.size-base}", 0.875));
    typography.insert("size-lg".into(), compute!(Scale, "{typography.size-base}", 1.125));
    typography.insert("size-xl".into(), compute!(Scale, "{typography.size-base}", 1.25));
    typography.insert("size-2xl".into(), compute!(Scale, "{typography.size-base}", 1.5));
    typography.insert("line-height".into(), 1.5.into());

    let mut opacity = TokenMap::new();
    opacity.insert("disabled".into(), 0.6.into());
    opacity.insert("overlay".into(), 0.8.into());

    TokenSource::new(BASE_ID, "Tinct Base")
        .with_category(category::SPACING, spacing)
        .with_category(category::BORDER_RADIUS, radii)
        .with_category(category::TYPOGRAPHY, typography)
        .with_category(category::OPACITY, opacity)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Light,
    Dark,
}

#[derive(Clone, Copy)]
struct BasePalette {
    background: &'static str,
    foreground: &'static str,
    card: &'static str,
    primary: &'static str,
    primary_foreground: &'static str,
    secondary: &'static str,
    muted: &'static str,
    muted_foreground: &'static str,
    accent: &'static str,
    destructive: &'static str,
    border: &'static str,
    ring: &'static str,
}

/// Darken toward black in light mode, lighten toward white in dark mode.
fn shift(scheme: Scheme, path: &str, amount: f64) -> TokenValue {
    let target = format!("{{{path}}}");
    match scheme {
        Scheme::Light => compute!(Darken, target, amount),
        Scheme::Dark => compute!(Lighten, target, amount),
    }
}

fn subtle(path: &str, alpha: f64) -> TokenValue {
    compute!(Opacity, format!("{{{path}}}"), alpha)
}

fn build_colors(base: BasePalette, scheme: Scheme) -> TokenMap {
    let (primary_hover, primary_active, secondary_hover, secondary_active) = match scheme {
        Scheme::Light => (10.0, 20.0, 8.0, 16.0),
        Scheme::Dark => (6.0, 12.0, 6.0, 10.0),
    };
    let (selection_alpha, subtle_alpha) = match scheme {
        Scheme::Light => (0.22, 0.14),
        Scheme::Dark => (0.28, 0.24),
    };
    let (success, warning, info) = match scheme {
        Scheme::Light => ("#16a34a", "#d97706", "#0ea5e9"),
        Scheme::Dark => ("#22c55e", "#f59e0b", "#38bdf8"),
    };

    let entries: Vec<(&str, TokenValue)> = vec![
        ("primary", base.primary.into()),
        ("primary-hover", shift(scheme, "colors.primary", primary_hover)),
        ("primary-active", shift(scheme, "colors.primary", primary_active)),
        ("secondary", base.secondary.into()),
        ("secondary-hover", shift(scheme, "colors.secondary", secondary_hover)),
        ("secondary-active", shift(scheme, "colors.secondary", secondary_active)),
        ("success", success.into()),
        ("success-bg", subtle("colors.success", subtle_alpha)),
        ("warning", warning.into()),
        ("warning-bg", subtle("colors.warning", subtle_alpha)),
        ("error", base.destructive.into()),
        ("error-bg", subtle("colors.error", subtle_alpha)),
        ("info", info.into()),
        ("info-bg", subtle("colors.info", subtle_alpha)),
        ("background", base.background.into()),
        ("surface", base.card.into()),
        ("surface-elevated", shift(scheme, "colors.surface", 4.0)),
        ("surface-overlay", base.muted.into()),
        ("text-primary", base.foreground.into()),
        ("text-secondary", base.muted_foreground.into()),
        ("text-tertiary", subtle("colors.text-secondary", 0.75)),
        ("text-inverse", base.primary_foreground.into()),
        ("text-link", reference("colors.primary")),
        ("border", base.border.into()),
        ("border-hover", shift(scheme, "colors.border", 16.0)),
        ("border-focus", base.ring.into()),
        ("border-error", reference("colors.error")),
        ("input-bg", reference("colors.background")),
        ("input-bg-hover", reference("colors.surface")),
        ("input-bg-focus", reference("colors.background")),
        ("input-bg-disabled", reference("colors.surface-overlay")),
        ("selection", subtle("colors.primary", selection_alpha)),
        ("selection-text", reference("colors.text-primary")),
        ("accent", base.accent.into()),
        ("accent-subtle", subtle("colors.accent", subtle_alpha)),
        ("tooltip-bg", reference("colors.text-primary")),
        ("tooltip-text", reference("colors.background")),
    ];

    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn build_effects() -> TokenMap {
    let mut effects = TokenMap::new();
    effects.insert(
        "focus-ring".into(),
        "0 0 0 2px {colors.border-focus}".into(),
    );
    effects.insert("disabled-opacity".into(), reference("opacity.disabled"));
    effects
}

fn neutral_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#0a0a0a",
        card: "#ffffff",
        primary: "#171717",
        primary_foreground: "#fafafa",
        secondary: "#f5f5f5",
        muted: "#f5f5f5",
        muted_foreground: "#737373",
        accent: "#f5f5f5",
        destructive: "#ef4444",
        border: "#e5e5e5",
        ring: "#0a0a0a",
    }
}

fn neutral_dark() -> BasePalette {
    BasePalette {
        background: "#0a0a0a",
        foreground: "#fafafa",
        card: "#0a0a0a",
        primary: "#fafafa",
        primary_foreground: "#171717",
        secondary: "#262626",
        muted: "#262626",
        muted_foreground: "#a3a3a3",
        accent: "#262626",
        destructive: "#7f1d1d",
        border: "#262626",
        ring: "#d4d4d4",
    }
}

fn slate_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#020817",
        card: "#ffffff",
        primary: "#0f172a",
        primary_foreground: "#f8fafc",
        secondary: "#f1f5f9",
        muted: "#f1f5f9",
        muted_foreground: "#64748b",
        accent: "#f1f5f9",
        destructive: "#ef4444",
        border: "#e2e8f0",
        ring: "#020817",
    }
}

fn slate_dark() -> BasePalette {
    BasePalette {
        background: "#020817",
        foreground: "#f8fafc",
        card: "#020817",
        primary: "#f8fafc",
        primary_foreground: "#0f172a",
        secondary: "#1e293b",
        muted: "#1e293b",
        muted_foreground: "#94a3b8",
        accent: "#1e293b",
        destructive: "#7f1d1d",
        border: "#1e293b",
        ring: "#cbd5e1",
    }
}

fn zinc_light() -> BasePalette {
    BasePalette {
        background: "#ffffff",
        foreground: "#09090b",
        card: "#ffffff",
        primary: "#18181b",
        primary_foreground: "#fafafa",
        secondary: "#f4f4f5",
        muted: "#f4f4f5",
        muted_foreground: "#71717a",
        accent: "#f4f4f5",
        destructive: "#ef4444",
        border: "#e4e4e7",
        ring: "#09090b",
    }
}

fn zinc_dark() -> BasePalette {
    BasePalette {
        background: "#09090b",
        foreground: "#fafafa",
        card: "#09090b",
        primary: "#fafafa",
        primary_foreground: "#18181b",
        secondary: "#27272a",
        muted: "#27272a",
        muted_foreground: "#a1a1aa",
        accent: "#27272a",
        destructive: "#7f1d1d",
        border: "#27272a",
        ring: "#d4d4d8",
    }
}
