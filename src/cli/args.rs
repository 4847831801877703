//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::CountPolicy;

/// Render frequency-annotated tries as Graphviz diagrams
#[derive(Parser, Debug)]
#[command(name = "trieviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Explicit config file (layered over the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Own-count policy: subtractive or cumulative
    #[arg(long, global = true)]
    pub policy: Option<CountPolicy>,

    /// Maximum trie depth to walk
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a trie JSON file to an image
    Render {
        /// Trie JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Output path without extension (default: input without extension)
        #[arg(value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Image format passed to Graphviz (default: from config, png)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Print the Graphviz DOT document for a trie
    Dot {
        /// Trie JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Show a trie as a text tree
    Tree {
        /// Trie JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

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

    /// Write a config template to the global config location
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
