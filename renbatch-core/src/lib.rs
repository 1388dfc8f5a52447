#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod enumerate;
pub mod error;
pub mod execute;
pub mod log;
pub mod operations;
pub mod output;
pub mod plan;
pub mod preview;
pub mod strategy;

pub use config::Config;
pub use enumerate::{list_files, FileEntry};
pub use error::RenameError;
pub use execute::{execute_plan, ExecuteOptions, ExecutionReport};
pub use log::RunLog;
pub use operations::{rename_operation, RunOptions, RunState};
pub use output::{OutputFormat, OutputFormatter, RenameResult, VersionResult};
pub use plan::{build_plan, RenamePlan};
pub use preview::{render_line, render_table, should_use_color, Preview};
pub use strategy::{
    DatePrefix, FindReplace, Lowercase, RenamePair, RenameStrategy, Sequential, StrategyConfig,
    MAX_PAD,
};
