//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **pick**: Edit a tag selection interactively (default)
//! - **init-config**: Write the default configuration file
//!
//! # Examples
//!
//! ```no_run
//! use tagselect::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_args();
//! match cli.get_command() {
//!     Commands::Pick(args) => println!("catalog: {:?}", args.catalog),
//!     Commands::InitConfig { force } => println!("force: {force}"),
//! }
//! ```

use crate::config::TagSelectConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tagselect")]
#[command(
    about = "Pick tags from a catalog with search, creation and keyboard navigation",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long = "log-file", global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Edit a tag selection interactively (default)
    #[command(visible_alias = "p")]
    Pick(PickArgs),

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

/// Arguments for the pick command
#[derive(Args, Debug, Clone, Default)]
pub struct PickArgs {
    /// TOML catalog file (`[[options]]` with value, label, selected)
    #[arg(value_name = "CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Preselect values (can specify multiple: -s a -s b)
    #[arg(short = 's', long = "select", value_name = "VALUE")]
    pub select: Vec<String>,

    /// Maximum number of tags (overrides config)
    #[arg(long = "max-tags", value_name = "N")]
    pub max_tags: Option<usize>,

    /// Minimum number of tags kept on removal (overrides config)
    #[arg(long = "min-tags", value_name = "N")]
    pub min_tags: Option<usize>,

    /// Disallow creating tags that are not in the catalog
    #[arg(long = "no-new")]
    pub no_new: bool,

    /// Title shown above the tags
    #[arg(short = 't', long = "title", value_name = "TITLE")]
    pub title: Option<String>,

    /// Print the selection as a JSON array
    #[arg(long = "json")]
    pub json: bool,

    /// Write the final selection back into the catalog file
    #[arg(short = 'w', long = "write", requires = "catalog")]
    pub write: bool,
}

impl PickArgs {
    /// Apply command-line overrides to a loaded configuration
    pub fn apply(&self, config: &mut TagSelectConfig) {
        if let Some(max) = self.max_tags {
            config.max_tags = Some(max);
        }
        if let Some(min) = self.min_tags {
            config.min_tags = min;
        }
        if self.no_new {
            config.allow_new = false;
        }
    }
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to `pick` with no arguments
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Pick(PickArgs::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_pick() {
        let cli = Cli::parse_from(["tagselect"]);
        assert!(matches!(cli.get_command(), Commands::Pick(_)));
    }

    #[test]
    fn test_pick_args() {
        let cli = Cli::parse_from([
            "tagselect",
            "pick",
            "fruit.toml",
            "-s",
            "a",
            "-s",
            "b",
            "--max-tags",
            "3",
            "--no-new",
            "--json",
        ]);
        let Commands::Pick(args) = cli.get_command() else {
            panic!("expected pick");
        };

        assert_eq!(args.catalog, Some(PathBuf::from("fruit.toml")));
        assert_eq!(args.select, vec!["a", "b"]);
        assert_eq!(args.max_tags, Some(3));
        assert!(args.no_new);
        assert!(args.json);
    }

    #[test]
    fn test_write_requires_catalog() {
        assert!(Cli::try_parse_from(["tagselect", "pick", "--write"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::parse_from(["tagselect", "init-config", "--force", "--config", "/tmp/x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
        assert!(matches!(cli.get_command(), Commands::InitConfig { force: true }));
    }

    #[test]
    fn test_apply_overrides() {
        let args = PickArgs {
            max_tags: Some(2),
            min_tags: Some(1),
            no_new: true,
            ..PickArgs::default()
        };
        let mut config = TagSelectConfig::default();
        args.apply(&mut config);

        assert_eq!(config.max_tags, Some(2));
        assert_eq!(config.min_tags, 1);
        assert!(!config.allow_new);
    }
}
