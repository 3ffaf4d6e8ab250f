//! Command-line interface definitions.
//!
//! Defines all CLI arguments using clap.

use clap::Parser;
use std::path::PathBuf;

/// mdsite static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project directory containing `content/`, `templates/` and `config.yaml`
    pub project: PathBuf,

    /// Config file name (default: config.yaml)
    #[arg(short = 'C', long, default_value = "config.yaml")]
    pub config: PathBuf,
}

impl Cli {
    /// Parse arguments, exiting with status 1 on usage errors.
    ///
    /// `--help` and `--version` keep clap's success exit path.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(err) if err.use_stderr() => {
                err.print().ok();
                std::process::exit(1);
            }
            Err(err) => err.exit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_dir() {
        let cli = Cli::try_parse_from(["mdsite", "my-site"]).unwrap();
        assert_eq!(cli.project, PathBuf::from("my-site"));
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_parse_config_override() {
        let cli = Cli::try_parse_from(["mdsite", "my-site", "-C", "site.yaml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("site.yaml"));
    }

    #[test]
    fn test_missing_project_is_an_error() {
        assert!(Cli::try_parse_from(["mdsite"]).is_err());
    }
}
