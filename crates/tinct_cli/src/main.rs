//! Tinct CLI
//!
//! ```bash
//! tinct init my-theme
//! tinct --project my-theme list
//! tinct --project my-theme resolve dark --format toml
//! tinct --project my-theme chain dark
//! tinct --project my-theme check
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tinct_tokens::{EngineConfig, TokenEngine, UnresolvedPolicy};

mod config;
mod project;

use config::TinctConfig;

#[derive(Parser)]
#[command(name = "tinct")]
#[command(version)]
#[command(about = "Resolve and check design token themes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory or tinct.toml path
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Toml,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new token project
    Init {
        /// Project directory
        path: PathBuf,

        /// Project name (defaults to the directory name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List registered sources
    List,

    /// Print the resolved theme of a source
    Resolve {
        /// Source id
        id: String,

        #[arg(long, short = 'f', default_value = "json", value_enum)]
        format: OutputFormat,
    },

    /// Print the inheritance chain of a source, self first
    Chain {
        /// Source id
        id: String,
    },

    /// Resolve every source and fail on any unresolved token
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path, name } => cmd_init(&path, name),
        Commands::List => cmd_list(&cli.project),
        Commands::Resolve { id, format } => cmd_resolve(&cli.project, &id, format),
        Commands::Chain { id } => cmd_chain(&cli.project, &id),
        Commands::Check => cmd_check(&cli.project),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Project root for a `--project` argument that may point at the file itself.
fn project_root(project: &Path) -> &Path {
    if project.is_file() {
        project.parent().unwrap_or(Path::new("."))
    } else {
        project
    }
}

fn load_engine(project: &Path, engine: Option<EngineConfig>) -> Result<TokenEngine> {
    let config = TinctConfig::load_from_dir(project)?;
    info!(project = %config.project.name, sources = config.sources.len(), "loaded project");
    config.build_engine(project_root(project), engine)
}

fn cmd_init(path: &Path, name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .context("cannot derive a project name from the path; pass --name")?,
    };

    project::create_project(path, &name)?;
    info!(path = %path.display(), "created project `{name}`");
    Ok(())
}

fn cmd_list(project: &Path) -> Result<()> {
    let engine = load_engine(project, None)?;
    for source in engine.get_all_sources() {
        match &source.extends {
            Some(parent) => println!("{} ({}) extends {parent}", source.id, source.name),
            None => println!("{} ({})", source.id, source.name),
        }
    }
    Ok(())
}

fn cmd_resolve(project: &Path, id: &str, format: OutputFormat) -> Result<()> {
    let mut engine = load_engine(project, None)?;
    let theme = engine
        .resolve_to_theme(id)
        .with_context(|| format!("Failed to resolve `{id}`"))?;

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&theme)?,
        OutputFormat::Toml => toml::to_string_pretty(&theme)?,
    };
    println!("{output}");
    Ok(())
}

fn cmd_chain(project: &Path, id: &str) -> Result<()> {
    let engine = load_engine(project, None)?;
    if engine.get_source(id).is_none() {
        bail!("token source not found: {id}");
    }
    let chain = engine.get_inheritance_chain(id)?;
    println!("{}", chain.join(" -> "));
    Ok(())
}

fn cmd_check(project: &Path) -> Result<()> {
    let config = TinctConfig::load_from_dir(project)?;
    let strict = EngineConfig {
        unresolved: UnresolvedPolicy::Error,
        ..config.engine.clone()
    };
    let mut engine = config.build_engine(project_root(project), Some(strict))?;

    let ids: Vec<String> = engine
        .get_all_sources()
        .iter()
        .map(|source| source.id.clone())
        .collect();

    let mut failures = 0;
    for id in &ids {
        match engine.resolve(id) {
            Ok(tokens) => {
                let count: usize = tokens.values().map(|category| category.len()).sum();
                println!("ok    {id} ({count} tokens)");
            }
            Err(err) => {
                failures += 1;
                error!(source = %id, "{err}");
                println!("FAIL  {id}: {err}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} sources failed to resolve", ids.len());
    }
    Ok(())
}
