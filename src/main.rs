use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use mintpaint::config::Config;
use mintpaint::replay::ReplayScript;
use mintpaint::tools::{ToolCategory, ToolFactory, ToolRegistry};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mintpaint")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MINTPAINT_GIT_HASH"), ")"),
    about = "Drawing tool engine for raster art canvases"
)]
struct Cli {
    /// List the registered drawing tools
    #[arg(long, action = ArgAction::SetTrue)]
    list_tools: bool,

    /// Only list tools of this category (core, gradient, pattern, symmetry)
    #[arg(long, value_name = "CATEGORY", requires = "list_tools")]
    category: Option<ToolCategory>,

    /// Replay a scripted drawing session and export it as PNG
    #[arg(long, value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Output file for --replay (defaults to the configured export directory)
    #[arg(long, short = 'o', value_name = "FILE", requires = "replay")]
    output: Option<PathBuf>,

    /// Use this config file instead of ~/.config/mintpaint/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if !cli.list_tools && cli.replay.is_none() {
        print_usage();
        return Ok(());
    }

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let registry = config
        .registry()
        .install()
        .context("Failed to install tool registry")?;

    if cli.list_tools {
        list_tools(registry, cli.category);
    }

    if let Some(script_path) = cli.replay.as_deref() {
        replay(&config, registry, script_path, cli.output)?;
    }

    Ok(())
}

fn list_tools(registry: &ToolRegistry, category: Option<ToolCategory>) {
    let categories: Vec<ToolCategory> = match category {
        Some(category) => vec![category],
        None => ToolCategory::ALL.to_vec(),
    };

    for category in categories {
        for def in registry.list_by_category(category) {
            println!(
                "{:<18} {:<18} {:<10} {}",
                def.id, def.name, def.category, def.description
            );
        }
    }
}

fn replay(
    config: &Config,
    registry: &'static ToolRegistry,
    script_path: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let script = ReplayScript::load(script_path)?;
    let result = script.run(ToolFactory::new(registry), &config.canvas)?;

    let output_path = output.unwrap_or_else(|| config.export.output_path(chrono::Local::now()));
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    result
        .surface
        .write_png(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    log::info!("Exported drawing to {}", output_path.display());
    println!(
        "Wrote {} ({} strokes, {} skipped)",
        output_path.display(),
        result.strokes_drawn,
        result.strokes_skipped
    );
    Ok(())
}

fn print_usage() {
    println!("mintpaint: Drawing tool engine for raster art canvases");
    println!();
    println!("Usage:");
    println!("  mintpaint --list-tools [--category <CATEGORY>]   Show the tool palette");
    println!("  mintpaint --replay <SCRIPT> [--output <FILE>]    Render a stroke script to PNG");
    println!("  mintpaint --help                                 Show help");
    println!();
    println!("Options:");
    println!("  --config <PATH>   Read settings from PATH instead of ~/.config/mintpaint/config.toml");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=debug mintpaint --replay drawing.toml");
}
