//! Marble texture generator
//!
//! Renders the built-in marble presets as seamless PNG textures for the web
//! client. With no arguments every preset is written at 2048x2048 into
//! `client/public/assets/marble-textures`.
//!
//! # Usage
//! ```bash
//! # Generate all presets with default settings
//! gen-marble
//!
//! # Quick low-resolution preview of two presets, reproducible
//! gen-marble --size 512 --seed 7 -p statuario -p "grey emperador" -o /tmp/marble
//!
//! # Show available presets
//! gen-marble --list
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use marble_gen::batch::{run_batch, BatchConfig, DEFAULT_OUTPUT_DIR, DEFAULT_SIZE};
use marble_gen::presets::PRESETS;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gen-marble")]
#[command(about = "Generate seamless procedural marble textures")]
#[command(version)]
struct Cli {
    /// Output directory for generated textures
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Texture width and height in pixels
    #[arg(short, long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Seed for vein placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Only render the named preset (repeatable)
    #[arg(short, long = "preset", value_name = "NAME")]
    presets: Vec<String>,

    /// Render presets in parallel
    #[arg(long)]
    parallel: bool,

    /// List available presets and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.list {
        for recipe in PRESETS {
            println!("{:<16} {}", recipe.name, recipe.file_name);
        }
        return Ok(());
    }

    let config = BatchConfig {
        output_dir: cli.output,
        size: cli.size,
        seed: cli.seed,
        presets: cli.presets,
        parallel: cli.parallel,
    };

    run_batch(&config)
        .with_context(|| format!("Marble generation failed in {}", config.output_dir.display()))?;

    Ok(())
}
