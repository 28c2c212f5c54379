use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use delve_core::DungeonGenerator;
use delve_tools::{DungeonExport, init_tracing, load_config, render_text};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Generate and inspect a dungeon", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 60)]
    width: usize,
    #[arg(long, default_value_t = 40)]
    height: usize,
    /// TOML file overriding generator and combat tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let dungeon = DungeonGenerator::new(args.seed, config.generator)
        .generate(args.width, args.height)
        .with_context(|| format!("Failed to generate dungeon for seed {}", args.seed))?;
    info!(seed = args.seed, rooms = dungeon.rooms.len(), "dungeon ready");

    match args.format {
        Format::Text => print!("{}", render_text(&dungeon)),
        Format::Json => {
            let json = serde_json::to_string_pretty(&DungeonExport::new(&dungeon))
                .context("Failed to serialize dungeon")?;
            println!("{json}");
        }
    }
    Ok(())
}
