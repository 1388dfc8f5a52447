use clap::builder::{NonEmptyStringValueParser, RangedU64ValueParser};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use renbatch_core::MAX_PAD;
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Rename a batch of files in one directory
#[derive(Parser, Debug)]
#[command(name = "renbatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,
}

/// Arguments shared by every rename mode
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Directory whose files are renamed (not recursive)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Show what would be renamed without renaming anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// How to show renames (defaults from config if not specified)
    #[arg(long, value_enum)]
    pub preview: Option<PreviewArg>,

    /// Output format for machine consumption
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Suppress all output (alias for --preview none)
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Append a timestamped log of the run to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prefix files with a zero-padded running number: 001-name
    Seq {
        #[command(flatten)]
        run: RunArgs,

        /// First number to assign [default: 1]
        #[arg(long)]
        start: Option<u64>,

        /// Minimum number of digits, 0 for no padding [default: 3]
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_PAD as u64))]
        pad: Option<usize>,
    },

    /// Prefix files with their modification date: YYYY-MM-DD-name
    Date {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Replace every literal occurrence of a substring in file names
    Replace {
        #[command(flatten)]
        run: RunArgs,

        /// Text to look for (literal, not a regex)
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        find: String,

        /// Text to put in its place
        #[arg(long = "replace", value_parser = NonEmptyStringValueParser::new())]
        replace: String,
    },

    /// Lowercase ASCII letters in file names
    Lower {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        shell: Shell,

        /// Write the completion file into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}
