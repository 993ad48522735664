// Declare modules
pub mod cli;
pub mod config;
pub mod extract;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::models::{RuntimeConfig, OUTPUT_FILE};
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::try_parse_args(env::args_os()).unwrap_or_else(|err| err.exit());
    init_logging(args.quiet);

    // 2. Identify Project Root & Name
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());

    // 3. Resolve Configuration
    let config = resolve_config(args, project_name)?;
    log::debug!("Resolved configuration: {:?}", config);

    // 4. Scan, render and write
    let written = generate(&current_dir, &config)?;
    log::info!("✅ .clangd file written to {}", written.display());

    Ok(())
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Regenerates `<root>/.clangd` from the project files below `root`.
///
/// Nothing is written unless both extractions succeed. An existing file is
/// overwritten in full.
pub fn generate(root: &Path, config: &RuntimeConfig) -> Result<PathBuf> {
    let scanner = Scanner::new(root.to_path_buf(), config);
    let flags = scanner.scan()?;

    let content = OutputGenerator::generate(scanner.root(), &flags, config.wall);

    let target = root.join(OUTPUT_FILE);
    fs::write(&target, content).with_context(|| format!("Failed to write {:?}", target))?;

    Ok(target)
}
