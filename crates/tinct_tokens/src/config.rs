//! Engine configuration
//!
//! Loaded from the `[engine]` table of a project file, or built in code.
//!
//! ```toml
//! max_passes = 10
//! max_chain_depth = 100
//! unresolved = "drop"
//! ```

use serde::{Deserialize, Serialize};

use crate::TokenError;

/// Stage B pass bound of the fixed-point reduction
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Longest `extends` chain accepted before it is treated as circular
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 100;

/// What to do with tokens that still hold references after the pass budget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Log a warning and leave the token out of the result.
    #[default]
    Drop,
    /// Fail the resolution with [`TokenError::Unresolved`].
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_passes: usize,
    pub max_chain_depth: usize,
    pub unresolved: UnresolvedPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            unresolved: UnresolvedPolicy::Drop,
        }
    }
}

impl EngineConfig {
    /// Strict variant used for validation runs.
    pub fn strict() -> Self {
        Self {
            unresolved: UnresolvedPolicy::Error,
            ..Self::default()
        }
    }

    /// Parse a config from TOML. Missing fields take their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, TokenError> {
        toml::from_str(src).map_err(|e| TokenError::Config(e.to_string()))
    }
}
