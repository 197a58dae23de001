//! Tagselect CLI application entry point
//!
//! Opens a catalog of tags, lets the user search, pick, create and remove
//! tags in a terminal UI, and prints the final selection.
//!
//! # Usage
//!
//! ```bash
//! # Pick from a catalog file (default command)
//! tagselect fruit.toml
//! tagselect pick fruit.toml --max-tags 3
//!
//! # Preselect values and print JSON
//! tagselect pick fruit.toml -s apple -s kiwi --json
//!
//! # Save the selection back into the catalog
//! tagselect pick fruit.toml --write
//!
//! # Write the default configuration file
//! tagselect init-config
//! ```
//!
//! # Configuration
//!
//! Settings are read from `~/.config/tagselect/config.toml` on Linux, or
//! the file given with `--config`.

use colored::Colorize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tagselect::{
    HostControl, SelectControl, TagOption, TagSelect, TagSelectConfig, TagSelectError,
    cli::{Cli, Commands, PickArgs},
    tui::{Outcome, TerminalFrontend},
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, TagSelectError>;

/// Send tracing output to a file, since the TUI owns the terminal
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tagselect=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        eprintln!(
            "{} {} already exists (use --force to overwrite)",
            "⚠️".yellow(),
            path.display()
        );
        return Ok(());
    }
    TagSelectConfig::default().save_to(path)?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}

fn pick(args: &PickArgs, config_path: &Path) -> Result<()> {
    let mut config = TagSelectConfig::load_from(config_path)?;
    args.apply(&mut config);

    let mut host = match &args.catalog {
        Some(path) => SelectControl::load(path)?,
        None => SelectControl::default(),
    };
    for value in &args.select {
        host.set_selected(&TagOption::new(value.as_str(), value.as_str()), true);
    }

    let mut widget = TagSelect::builder(host)
        .config(config)
        .on_change(|values| tracing::info!(?values, "selection changed"))
        .build()?;

    let frontend = TerminalFrontend::new().with_title(args.title.as_deref().unwrap_or("Tags"));
    let outcome = frontend.run(&mut widget)?;
    widget.destroy();

    if outcome == Outcome::Aborted {
        eprintln!("{}", "Aborted".dimmed());
        return Ok(());
    }

    let values = widget.values();
    if args.json {
        println!("{}", serde_json::to_string(&values)?);
    } else {
        for value in &values {
            println!("{value}");
        }
    }

    if args.write
        && let Some(path) = &args.catalog
    {
        widget.into_host().save(path)?;
        eprintln!("{} Saved selection to {}", "✓".green(), path.display());
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    init_logging(cli.log_file.as_deref())?;

    let config_path: PathBuf = match &cli.config {
        Some(path) => path.clone(),
        None => TagSelectConfig::config_path()?,
    };

    match cli.get_command() {
        Commands::Pick(args) => pick(&args, &config_path),
        Commands::InitConfig { force } => init_config(&config_path, force),
    }
}

fn main() {
    let cli = Cli::parse_args();
    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "❌".red());
        std::process::exit(1);
    }
}
