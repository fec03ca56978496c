//! Command line argument parsing using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Builds, serializes and inspects inverted indices over term-id documents
#[derive(Parser, Debug, Clone)]
#[command(name = "posting-index")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PostingIndexArgs {
    /// Verbosity level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show progress bars on stderr
    #[arg(long, global = true)]
    pub progress: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl PostingIndexArgs {
    /// Log filter used when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index from a document file (one document per line)
    Build(BuildArgs),

    /// Print the k largest posting lists of a binary index
    #[command(name = "top-k")]
    TopK(TopKArgs),

    /// Convert a text index into a binary index
    Serialize(SerializeArgs),

    /// Print a binary index in the text format
    Dump(DumpArgs),

    /// Rebuild the documents of a binary index
    Documents(DocumentsArgs),

    /// Print statistics of a binary index as JSON
    Stats(StatsArgs),

    /// Renumber labels to dense IDs in first-seen order
    Remap(RemapArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    Text,
    Binary,
}

#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Document file ("-" for stdin)
    pub input: PathBuf,

    /// Largest valid term ID (the largest term seen if omitted)
    pub universe_size: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: IndexFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TopKArgs {
    /// Binary index ("-" for stdin)
    pub index: PathBuf,

    /// Number of lists to select
    pub k: usize,

    /// Read the file as a stream instead of memory mapping it
    #[arg(long)]
    pub stream: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SerializeArgs {
    /// Text index ("-" for stdin)
    pub input: PathBuf,

    /// Binary index to write
    pub output: PathBuf,

    /// Sort the document IDs of each list instead of rejecting unsorted lists
    #[arg(long)]
    pub sort: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DumpArgs {
    /// Binary index ("-" for stdin)
    pub index: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DocumentsArgs {
    /// Binary index ("-" for stdin)
    pub index: PathBuf,

    /// Prefix each document with its ID
    #[arg(long)]
    pub with_ids: bool,

    /// Number of documents (the largest document ID plus one if omitted)
    #[arg(short, long)]
    pub num_documents: Option<u64>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct StatsArgs {
    /// Binary index ("-" for stdin)
    pub index: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RemapArgs {
    /// Input file ("-" for stdin)
    pub input: PathBuf,
}
