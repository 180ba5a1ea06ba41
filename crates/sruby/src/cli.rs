use clap::Parser;

use std::path::PathBuf;

/// Interns the identifiers of a Ruby source file and reports on the name table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dump every entry of the name table after interning.
    #[clap(long)]
    pub verbose: bool,

    /// Measure and report the time taken by each stage.
    #[clap(long)]
    pub profile: bool,

    /// Synthesize one desugar name for every distinct identifier.
    #[clap(long)]
    pub desugar: bool,

    /// Initial capacity, in bytes, of the name table's text buffer.
    #[clap(long, default_value_t = 1024)]
    pub capacity: usize,

    /// The path to the Ruby source file.
    pub path: PathBuf,
}

impl Args {
    /// Parses the arguments of the current process, exiting on invalid input.
    pub fn from_cli() -> Self {
        Self::parse()
    }
}
