use crate::enumerate::FileEntry;
use crate::error::{RenameError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A computed rename inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenamePair {
    pub old_name: String,
    pub new_name: String,
}

impl RenamePair {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.old_name == self.new_name
    }

    /// True when the names differ only by ASCII letter case.
    pub fn is_case_only(&self) -> bool {
        !self.is_noop() && self.old_name.eq_ignore_ascii_case(&self.new_name)
    }
}

impl fmt::Display for RenamePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old_name, self.new_name)
    }
}

/// Computes new names for an ordered list of files.
///
/// Implementations emit exactly one pair per entry, in entry order, and may
/// emit pairs whose names are unchanged. Filtering those out is the plan
/// builder's job.
pub trait RenameStrategy {
    fn compute_names(&self, entries: &[FileEntry]) -> Vec<RenamePair>;
}

/// `<counter>-<name>`, counter zero-padded to at least `pad` digits.
///
/// A `pad` above [`MAX_PAD`] is treated as [`MAX_PAD`];
/// [`StrategyConfig::validate`] rejects it outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequential {
    pub start: u64,
    pub pad: usize,
}

impl RenameStrategy for Sequential {
    fn compute_names(&self, entries: &[FileEntry]) -> Vec<RenamePair> {
        // The counter advances for every file, including ones whose name ends up unchanged.
        let mut counter = u128::from(self.start);
        let width = self.pad.min(MAX_PAD);
        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            let new_name = format!("{:0width$}-{}", counter, entry.name);
            pairs.push(RenamePair::new(entry.name.clone(), new_name));
            counter += 1;
        }
        pairs
    }
}

/// `YYYY-MM-DD-<name>` from the modification time in the local timezone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatePrefix;

impl DatePrefix {
    pub fn prefix_for(entry: &FileEntry) -> String {
        DateTime::<Local>::from(entry.modified)
            .format("%Y-%m-%d")
            .to_string()
    }
}

impl RenameStrategy for DatePrefix {
    fn compute_names(&self, entries: &[FileEntry]) -> Vec<RenamePair> {
        entries
            .iter()
            .map(|entry| {
                let new_name = format!("{}-{}", Self::prefix_for(entry), entry.name);
                RenamePair::new(entry.name.clone(), new_name)
            })
            .collect()
    }
}

/// Literal, non-overlapping, left-to-right substring replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindReplace {
    pub find: String,
    pub replace: String,
}

impl RenameStrategy for FindReplace {
    fn compute_names(&self, entries: &[FileEntry]) -> Vec<RenamePair> {
        entries
            .iter()
            .map(|entry| {
                let new_name = if self.find.is_empty() {
                    entry.name.clone()
                } else {
                    entry.name.replace(&self.find, &self.replace)
                };
                RenamePair::new(entry.name.clone(), new_name)
            })
            .collect()
    }
}

/// ASCII lowercase; non-ASCII characters are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lowercase;

impl RenameStrategy for Lowercase {
    fn compute_names(&self, entries: &[FileEntry]) -> Vec<RenamePair> {
        entries
            .iter()
            .map(|entry| RenamePair::new(entry.name.clone(), entry.name.to_ascii_lowercase()))
            .collect()
    }
}

pub const DEFAULT_START: u64 = 1;
pub const DEFAULT_PAD: usize = 3;
/// Widest counter `seq` accepts. A longer name cannot exist on common filesystems.
pub const MAX_PAD: usize = 255;

/// Which strategy to run and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum StrategyConfig {
    #[serde(rename = "seq")]
    Sequential { start: u64, pad: usize },
    #[serde(rename = "date")]
    DatePrefix,
    #[serde(rename = "replace")]
    FindReplace { find: String, replace: String },
    #[serde(rename = "lower")]
    Lowercase,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::Sequential {
            start: DEFAULT_START,
            pad: DEFAULT_PAD,
        }
    }
}

impl StrategyConfig {
    /// Short mode name as accepted on the command line.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Sequential { .. } => "seq",
            Self::DatePrefix => "date",
            Self::FindReplace { .. } => "replace",
            Self::Lowercase => "lower",
        }
    }

    /// Reject parameter combinations the strategies cannot handle.
    pub fn validate(&self) -> Result<()> {
        if let Self::Sequential { pad, .. } = self {
            if *pad > MAX_PAD {
                return Err(RenameError::InvalidConfig(format!(
                    "seq mode pad must be at most {MAX_PAD}, got {pad}"
                )));
            }
        }
        if let Self::FindReplace { find, replace } = self {
            if find.is_empty() {
                return Err(RenameError::InvalidConfig(
                    "replace mode requires a non-empty find string".to_string(),
                ));
            }
            if replace.is_empty() {
                return Err(RenameError::InvalidConfig(
                    "replace mode requires a non-empty replacement string".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn strategy(&self) -> Box<dyn RenameStrategy> {
        match self {
            Self::Sequential { start, pad } => Box::new(Sequential {
                start: *start,
                pad: *pad,
            }),
            Self::DatePrefix => Box::new(DatePrefix),
            Self::FindReplace { find, replace } => Box::new(FindReplace {
                find: find.clone(),
                replace: replace.clone(),
            }),
            Self::Lowercase => Box::new(Lowercase),
        }
    }
}

impl fmt::Display for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential { start, pad } => write!(f, "seq (start={start}, pad={pad})"),
            Self::DatePrefix => write!(f, "date"),
            Self::FindReplace { find, replace } => write!(f, "replace ('{find}' -> '{replace}')"),
            Self::Lowercase => write!(f, "lower"),
        }
    }
}
