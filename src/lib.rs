pub mod cli;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

pub use error::{MapError, Result};
pub use model::{CompressedGameMap, GameMap, RawGameMap};
pub use processor::{compress, decompress};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::parser::{DirectoryMapLoader, MapLoader};

pub fn run() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);
    execute(args.command)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

pub fn execute(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Compress {
            maps_dir,
            id,
            output,
            pretty,
        } => {
            // 1. ── Load ───────────────────────────────────────────────────
            let loader = DirectoryMapLoader::new(&maps_dir);
            let raw = loader
                .load(&id)
                .with_context(|| format!("Loading map `{id}` from {}", maps_dir.display()))?;

            // 2. ── Compress ───────────────────────────────────────────────
            let compressed = compress(&raw);
            info!(
                id = %id,
                tiles = compressed.tiles().len(),
                pool = compressed.constant_pool().len(),
                "compressed"
            );

            // 3. ── Write ──────────────────────────────────────────────────
            writer::json::emit(&compressed, &output, pretty)
                .with_context(|| format!("Writing {}", output.display()))?;
        }
        Command::Decompress {
            input,
            output,
            pretty,
        } => {
            let compressed = parser::read_compressed(&input)
                .with_context(|| format!("Reading {}", input.display()))?;
            let raw = compressed
                .raw_game_map()
                .with_context(|| format!("Decompressing {}", input.display()))?;
            info!(id = %raw.id, rows = raw.raw_tiles.len(), "decompressed");

            writer::json::emit(raw, &output, pretty)
                .with_context(|| format!("Writing {}", output.display()))?;
        }
        Command::Inspect { input } => {
            let compressed = parser::read_compressed(&input)
                .with_context(|| format!("Reading {}", input.display()))?;
            let size = compressed.size();
            let pixels = compressed.pixel_size();
            println!("id:         {}", compressed.id());
            println!("size:       {}x{} tiles", size.width, size.height);
            println!("pixels:     {}x{}", pixels.width, pixels.height);
            println!("tiles:      {}", compressed.tiles().len());
            println!("pool:       {}", compressed.constant_pool().len());
            for (ty, count) in processor::pool_histogram(&compressed) {
                println!("  {:>2} {:<24} {count}", ty.tag(), format!("{ty:?}"));
            }
        }
    }
    Ok(())
}
