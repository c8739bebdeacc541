//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use ps_core::{OperatorKind, Split};
use std::path::PathBuf;

/// planspeak - Describe query execution plans in plain English
#[derive(Parser, Debug)]
#[command(name = "planspeak")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory that relative config paths are resolved against
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true, env = "PLANSPEAK_CONFIG")]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a showplan XML file as numbered instructions
    Text(TextArgs),

    /// Print the parsed plan tree as JSON
    Ast(AstArgs),

    /// Write a Graphviz diagram of a plan
    Graph(GraphArgs),

    /// Render every plan of a dataset split
    Dataset(DatasetArgs),

    /// Count operators of one kind across a dataset split
    Search(SearchArgs),
}

/// Arguments for the text command
#[derive(Args, Debug)]
pub struct TextArgs {
    /// Showplan XML file (`-` reads stdin)
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: TextOutput,
}

/// Text output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOutput {
    /// Numbered instruction list
    Text,
    /// JSON array of instructions
    Json,
}

/// Arguments for the ast command
#[derive(Args, Debug)]
pub struct AstArgs {
    /// Showplan XML file (`-` reads stdin)
    pub file: PathBuf,

    /// Print on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Showplan XML file (`-` reads stdin)
    pub file: PathBuf,

    /// Write the DOT source here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Graph name (default: the input file stem)
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the dataset command
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Split to render
    #[arg(short, long, value_enum, default_value = "all")]
    pub split: SplitArg,

    /// Stop at the first plan that fails to parse or render
    #[arg(long)]
    pub fail_fast: bool,

    /// Concurrent workers (overrides config, 0 = one per CPU)
    #[arg(short, long)]
    pub workers: Option<usize>,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Split to search
    #[arg(short, long, value_enum, default_value = "all")]
    pub split: SplitArg,

    /// Operator kind, e.g. `TableScan` or `nested-loops`
    #[arg(short, long)]
    pub operator: OperatorKind,
}

/// Dataset split selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitArg {
    /// Training split
    Train,
    /// Development split
    Dev,
    /// Both splits
    All,
}

impl SplitArg {
    /// Splits covered by this selection
    pub fn splits(self) -> Vec<Split> {
        match self {
            SplitArg::Train => vec![Split::Train],
            SplitArg::Dev => vec![Split::Dev],
            SplitArg::All => Split::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
