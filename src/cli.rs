use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load <maps_dir>/<id>.json and write its constant-pool form
    Compress {
        /// Directory holding <id>.json map files
        maps_dir: PathBuf,
        /// Map identifier
        id: String,
        /// Output .json file
        output: PathBuf,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Expand a constant-pool file back into a raw map
    Decompress {
        /// Input compressed .json file
        input: PathBuf,
        /// Output .json file
        output: PathBuf,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
    /// Print pool statistics of a compressed map
    Inspect {
        /// Input compressed .json file
        input: PathBuf,
    },
}
