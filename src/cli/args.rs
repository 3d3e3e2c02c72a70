//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::{OutputFormat, TransformMode};

/// Shape-aware transformer and indented reporter for JSON-like trees
#[derive(Parser, Debug)]
#[command(name = "treeshape")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Project directory holding .treeshape.toml (default: cwd)
    #[arg(short = 'C', long, global = true)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a document and print the report
    Render {
        /// JSON document ("-" reads stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Transform mode
        #[arg(short, long, value_enum)]
        mode: Option<TransformMode>,
        /// Report format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Spaces per depth level
        #[arg(short, long)]
        indent: Option<usize>,
    },

    /// Transform a document and print the result as JSON
    Transform {
        /// JSON document ("-" reads stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Transform mode
        #[arg(short, long, value_enum)]
        mode: Option<TransformMode>,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the record shape of every mapping
    Classify {
        /// JSON document ("-" reads stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Render the bundled sample documents
    Demo,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
