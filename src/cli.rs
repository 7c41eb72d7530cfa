use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dagr")]
#[command(about = "Topological sorting and cycle detection for directed graphs")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(flatten)]
    pub source: GraphSource,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the graph comes from
#[derive(Args, Debug, Clone, Default)]
pub struct GraphSource {
    /// Dataset JSON file (defaults to the built-in credit-worthiness network)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Extra edge to add after loading, repeatable
    #[arg(long = "edge", value_name = "FROM:TO", global = true)]
    pub edges: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the graph
    Show {
        /// Treat edges as undirected
        #[arg(long)]
        undirected: bool,
    },

    /// List nodes without incoming edges
    Heads {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Print nodes in topological order
    Sort {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the graph has no cycle
    Check {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the dataset as JSON
    Dataset,
}
