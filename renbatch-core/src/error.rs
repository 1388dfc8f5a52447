use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while enumerating, planning or applying a batch rename.
#[derive(Debug, Error)]
pub enum RenameError {
    /// Listing the target directory failed.
    #[error("cannot read directory {}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single rename step failed. Renames applied before it stay in place.
    #[error("failed to rename {old_name} -> {new_name}")]
    RenameFailed {
        old_name: String,
        new_name: String,
        #[source]
        source: io::Error,
    },

    /// Two files would end up with the same name, either because both are
    /// renamed to it or because one is renamed onto a file that keeps it.
    #[error("name conflict: {first} and {second} would both be named {new_name}")]
    DuplicateTarget {
        new_name: String,
        first: String,
        second: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write output")]
    Output(#[source] io::Error),

    #[error("failed to write run log")]
    Log(#[source] io::Error),
}

impl RenameError {
    /// Exit code for this error, following the `1 = conflict`, `2 = invalid input`,
    /// `3 = internal` convention used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RenameFailed { .. } | Self::DuplicateTarget { .. } => 1,
            Self::InvalidConfig(_) => 2,
            Self::DirectoryUnreadable { .. } | Self::Output(_) | Self::Log(_) => 3,
        }
    }
}

pub type Result<T, E = RenameError> = std::result::Result<T, E>;
