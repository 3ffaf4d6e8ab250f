//! mdsite - a static site generator for markdown content trees.

mod build;
mod cli;
mod compiler;
mod config;
mod utils;

use anyhow::{Result, bail};
use build::build_site;
use cli::Cli;
use config::{PathError, SiteConfig};

fn main() -> Result<()> {
    let cli = Cli::parse_or_exit();
    let config = load_config(&cli)?;

    build_site(&config)
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    if !cli.project.is_dir() {
        bail!(PathError::NotADirectory(cli.project.clone()));
    }

    let config_path = cli.project.join(&cli.config);
    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.resolve_root(&cli.project);
    config.validate()?;

    Ok(config)
}
