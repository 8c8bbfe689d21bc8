//! Tinct project file handling

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use tinct_tokens::{preset_sources, EngineConfig, ThemePreset, TokenEngine, TokenSource};

pub const CONFIG_FILE: &str = "tinct.toml";

/// Top-level project configuration (tinct.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct TinctConfig {
    /// Built-in presets registered before the project's own sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<String>,
    pub project: ProjectConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

/// Project metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One token source file, relative to the project root
#[derive(Debug, Deserialize, Serialize)]
pub struct SourceEntry {
    pub path: String,
}

impl TinctConfig {
    /// Load configuration from a directory (looks for tinct.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            bail!(
                "No {CONFIG_FILE} found in {}. Run `tinct init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TinctConfig = toml::from_str(content)?;
        for preset in &config.presets {
            if ThemePreset::from_id(preset).is_none() {
                bail!("unknown preset `{preset}`");
            }
        }
        Ok(config)
    }

    /// Create a new configuration with the given project name
    pub fn new(name: &str) -> Self {
        Self {
            presets: Vec::new(),
            project: ProjectConfig {
                name: name.to_string(),
                description: None,
            },
            engine: EngineConfig::default(),
            sources: Vec::new(),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Read every preset and source file and register them in a fresh engine.
    ///
    /// `engine` overrides the `[engine]` table when given.
    pub fn build_engine(&self, root: &Path, engine: Option<EngineConfig>) -> Result<TokenEngine> {
        let mut tokens = TokenEngine::with_config(engine.unwrap_or_else(|| self.engine.clone()));

        for preset in &self.presets {
            let preset = ThemePreset::from_id(preset)
                .with_context(|| format!("unknown preset `{preset}`"))?;
            let ids = tokens.register_all(preset_sources(preset));
            debug!(%preset, ?ids, "registered preset");
        }

        for entry in &self.sources {
            let source = load_source(&root.join(&entry.path))?;
            tokens.register(source);
        }

        Ok(tokens)
    }
}

/// Read a token source file, TOML or JSON by extension.
pub fn load_source(path: &Path) -> Result<TokenSource> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_source(&content, path.extension().and_then(|ext| ext.to_str()))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_source(content: &str, extension: Option<&str>) -> Result<TokenSource> {
    match extension {
        Some("json") => Ok(serde_json::from_str(content)?),
        Some("toml") => Ok(toml::from_str(content)?),
        other => bail!(
            "unsupported token file extension {:?}, expected .toml or .json",
            other.unwrap_or("")
        ),
    }
}
