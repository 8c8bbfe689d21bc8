//! Tinct Token Engine
//!
//! Resolution of design tokens across inheriting themes.
//!
//! # Overview
//!
//! - **Token sources**: named bundles of tokens (a theme, a brand) that may
//!   extend one parent source and override individual tokens
//! - **References**: `{ "$ref": "colors.primary" }` values and inline
//!   `{spacing.unit}` substitutions inside strings
//! - **Computed tokens**: `{ "$compute": "scale", "args": ["{spacing.unit}", 2] }`
//!   using a fixed set of color and dimension functions
//! - **Caching**: per-source results, invalidated down the inheritance tree
//!   whenever a source is registered or removed
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tinct_tokens::{compute, TokenEngine, TokenSource};
//!
//! let mut engine = TokenEngine::new();
//! engine.register(
//!     TokenSource::new("base", "Base")
//!         .with_token("spacing", "unit", "4px")
//!         .with_token("spacing", "sm", compute!(Scale, "{spacing.unit}", 2)),
//! );
//! engine.register(
//!     TokenSource::new("brand", "Brand")
//!         .extending("base")
//!         .with_token("colors", "primary", "142 76% 36%"),
//! );
//!
//! let theme = engine.resolve_to_theme("brand")?;
//! assert_eq!(theme.get("spacing.sm"), Some("8px"));
//! ```
//!
//! # Inheritance
//!
//! A child resolves on top of its parent's *resolved* values: it can override
//! the result of a parent's computed token, but not re-parameterize the
//! formula. Merging is per key within each category, so overriding
//! `colors.primary` keeps the parent's `colors.background`.
//!
//! # Unresolved tokens
//!
//! References are reduced in a bounded number of passes. Tokens caught in a
//! reference cycle never settle; by default they are logged and left out of
//! the result (see [`Resolution::unresolved`]), or the resolution fails when
//! [`UnresolvedPolicy::Error`] is configured.

pub mod cache;
pub mod compute;
pub mod config;
mod error;
pub mod expr;
pub mod presets;
pub mod registry;
pub mod state;
pub mod theme;
pub mod tokens;

mod engine;

// Re-export commonly used types
pub use cache::{CacheStats, ResolutionCache};
pub use compute::{ComputeFn, Dimension};
pub use config::{EngineConfig, UnresolvedPolicy};
pub use engine::{resolve_all_tokens, InvalidationListener, Resolution, TokenEngine};
pub use error::TokenError;
pub use expr::resolve_value;
pub use presets::{base_source, preset_sources, ThemePreset};
pub use registry::SourceRegistry;
pub use state::{set_invalidation_callback, TokenState};
pub use theme::{theme_to_token_source, Theme};
pub use tokens::*;
