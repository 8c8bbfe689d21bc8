//! Project creation and scaffolding

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::config::{SourceEntry, TinctConfig, CONFIG_FILE};

/// Create a new Tinct project
pub fn create_project(path: &Path, name: &str) -> Result<()> {
    if path.join(CONFIG_FILE).exists() {
        bail!("{} already contains a {CONFIG_FILE}", path.display());
    }

    fs::create_dir_all(path.join("tokens"))?;

    let mut config = TinctConfig::new(name);
    config.sources = vec![
        SourceEntry {
            path: "tokens/base.toml".to_string(),
        },
        SourceEntry {
            path: "tokens/dark.toml".to_string(),
        },
    ];
    fs::write(path.join(CONFIG_FILE), config.to_toml()?)?;

    fs::write(path.join("tokens/base.toml"), template_base(name))?;
    fs::write(path.join("tokens/dark.toml"), template_dark(name))?;

    Ok(())
}

fn template_base(name: &str) -> String {
    format!(
        r#"id = "base"
name = "{name}"

[tokens.colors]
primary = "221 83% 53%"
primary-hover = {{ "$compute" = "darken", args = ["{{colors.primary}}", 10] }}
primary-subtle = {{ "$compute" = "opacity", args = ["{{colors.primary}}", 0.12] }}
background = "0 0% 100%"
foreground = "222 47% 11%"
ring = {{ "$ref" = "colors.primary" }}

[tokens.spacing]
unit = "4px"
sm = {{ "$compute" = "scale", args = ["{{spacing.unit}}", 2] }}
md = {{ "$compute" = "scale", args = ["{{spacing.unit}}", 4] }}
lg = {{ "$compute" = "scale", args = ["{{spacing.unit}}", 6] }}

[tokens.borderRadius]
default = "8px"
sm = {{ "$compute" = "subtract", args = ["{{borderRadius.default}}", 2] }}
lg = {{ "$compute" = "add", args = ["{{borderRadius.default}}", 6] }}

[tokens.effects]
focus-ring = "0 0 0 2px {{colors.ring}}"
"#
    )
}

fn template_dark(name: &str) -> String {
    format!(
        r#"id = "dark"
name = "{name} Dark"
extends = "base"

[tokens.colors]
background = "222 47% 11%"
foreground = "210 40% 98%"
primary-hover = {{ "$compute" = "lighten", args = ["{{colors.primary}}", 10] }}
"#
    )
}
