//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Path-addressed localization trees: look up, add, merge and compare strings
#[derive(Parser, Debug)]
#[command(name = "localizator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Localization to operate on (default: from config)
    #[arg(short, long, global = true, env = "LOCALIZATOR_LOCALIZATION")]
    pub localization: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the string at a path
    Get {
        /// Lookup path, e.g. menu.file.open
        path: String,
        /// Create the string with this value when missing
        #[arg(long, conflicts_with = "fallback")]
        init: Option<String>,
        /// Print this instead of failing when the lookup fails
        #[arg(long)]
        fallback: Option<String>,
    },

    /// Print an array, one element per line
    Array {
        /// Lookup path of the array
        path: String,
        /// Print only this element
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Add a string to a category
    #[command(name = "add-string")]
    AddString {
        /// Parent category path ("" for the root)
        category: String,
        /// Name of the new string
        name: String,
        /// Value of the new string
        value: String,
    },

    /// Add an empty category to a category
    #[command(name = "add-category")]
    AddCategory {
        /// Parent category path ("" for the root)
        category: String,
        /// Name of the new category
        name: String,
    },

    /// Overwrite an existing string
    Set {
        /// Lookup path of the string
        path: String,
        /// New value
        value: String,
    },

    /// Make two localizations contain the same paths
    Merge {
        /// First localization id
        first: String,
        /// Second localization id
        second: String,
        /// Copy values from the other side (false: use --default)
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        keep_values: bool,
        /// Value for strings added when --keep-values=false
        #[arg(long, default_value = "")]
        default: String,
    },

    /// Check whether two localizations have the same shape
    Equiv {
        /// First localization id
        first: String,
        /// Second localization id
        second: String,
    },

    /// Show the localization as a tree
    Tree,

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

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
