use crate::enumerate::FileEntry;
use crate::error::{RenameError, Result};
use crate::strategy::{RenamePair, StrategyConfig};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// The ordered set of renames to perform in one directory.
///
/// Pairs keep enumeration order and never contain a no-op. The plan is
/// read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    id: String,
    dir: PathBuf,
    strategy: StrategyConfig,
    files_scanned: usize,
    pairs: Vec<RenamePair>,
}

impl RenamePlan {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    pub fn pairs(&self) -> &[RenamePair] {
        &self.pairs
    }

    /// Number of files the strategy looked at, including unchanged ones.
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn renamed_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True if `name` is the destination of any pair in the plan.
    pub fn targets(&self, name: &str) -> bool {
        self.pairs.iter().any(|p| p.new_name == name)
    }
}

/// Run `config`'s strategy over `entries` and keep the pairs that change a name.
///
/// Fails with [`RenameError::DuplicateTarget`] when two files would end up
/// with the same name. A file the strategy leaves alone keeps its name, so
/// renaming another file onto it is a conflict too.
pub fn build_plan(dir: &Path, entries: &[FileEntry], config: &StrategyConfig) -> Result<RenamePlan> {
    config.validate()?;

    let computed = config.strategy().compute_names(entries);
    check_duplicate_targets(&computed)?;

    let pairs: Vec<RenamePair> = computed.into_iter().filter(|pair| !pair.is_noop()).collect();

    Ok(RenamePlan {
        id: generate_plan_id(dir, config, &pairs),
        dir: dir.to_path_buf(),
        strategy: config.clone(),
        files_scanned: entries.len(),
        pairs,
    })
}

fn check_duplicate_targets(pairs: &[RenamePair]) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(pairs.len());
    for pair in pairs {
        if let Some(first) = seen.insert(&pair.new_name, &pair.old_name) {
            return Err(RenameError::DuplicateTarget {
                new_name: pair.new_name.clone(),
                first: first.to_string(),
                second: pair.old_name.clone(),
            });
        }
    }
    Ok(())
}

fn generate_plan_id(dir: &Path, config: &StrategyConfig, pairs: &[RenamePair]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(dir.to_string_lossy().as_bytes());
    hasher.update(config.to_string().as_bytes());
    for pair in pairs {
        hasher.update(pair.old_name.as_bytes());
        hasher.update([0]);
        hasher.update(pair.new_name.as_bytes());
        hasher.update([0]);
    }
    let hash = hasher.finalize();

    let mut id = String::with_capacity(16);
    for byte in &hash[..8] {
        let _ = write!(id, "{byte:02x}");
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn entries(names: &[&str]) -> Vec<FileEntry> {
        names
            .iter()
            .map(|name| FileEntry {
                name: (*name).to_string(),
                path: PathBuf::from(name),
                modified: SystemTime::UNIX_EPOCH,
            })
            .collect()
    }

    #[test]
    fn test_noop_pairs_are_dropped_in_order() {
        let files = entries(&["Alpha.txt", "beta.txt", "Gamma.txt"]);
        let plan = build_plan(Path::new("."), &files, &StrategyConfig::Lowercase).unwrap();

        assert_eq!(plan.renamed_count(), 2);
        assert_eq!(plan.files_scanned(), 3);
        assert_eq!(plan.pairs()[0], RenamePair::new("Alpha.txt", "alpha.txt"));
        assert_eq!(plan.pairs()[1], RenamePair::new("Gamma.txt", "gamma.txt"));
    }

    #[test]
    fn test_find_absent_everywhere_gives_empty_plan() {
        let files = entries(&["a.txt", "b.txt"]);
        let config = StrategyConfig::FindReplace {
            find: "zzz".into(),
            replace: "y".into(),
        };
        let plan = build_plan(Path::new("."), &files, &config).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.renamed_count(), 0);
    }

    #[test]
    fn test_duplicate_targets_are_rejected() {
        let files = entries(&["Report.TXT", "REPORT.txt"]);
        let err = build_plan(Path::new("."), &files, &StrategyConfig::Lowercase).unwrap_err();
        match err {
            RenameError::DuplicateTarget {
                new_name,
                first,
                second,
            } => {
                assert_eq!(new_name, "report.txt");
                assert_eq!(first, "Report.TXT");
                assert_eq!(second, "REPORT.txt");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_target_held_by_unchanged_file_is_rejected() {
        let files = entries(&["a-1.md", "b-1.md", "b-2.md"]);
        let config = StrategyConfig::FindReplace {
            find: "1".into(),
            replace: "2".into(),
        };
        let err = build_plan(Path::new("."), &files, &config).unwrap_err();
        match err {
            RenameError::DuplicateTarget {
                new_name,
                first,
                second,
            } => {
                assert_eq!(new_name, "b-2.md");
                assert_eq!(first, "b-1.md");
                assert_eq!(second, "b-2.md");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_before_planning() {
        let config = StrategyConfig::FindReplace {
            find: String::new(),
            replace: "x".into(),
        };
        let err = build_plan(Path::new("."), &entries(&["a"]), &config).unwrap_err();
        assert!(matches!(err, RenameError::InvalidConfig(_)));
    }

    #[test]
    fn test_plan_id_is_stable() {
        let files = entries(&["a", "b"]);
        let first = build_plan(Path::new("/tmp/x"), &files, &StrategyConfig::default()).unwrap();
        let second = build_plan(Path::new("/tmp/x"), &files, &StrategyConfig::default()).unwrap();
        let other = build_plan(Path::new("/tmp/y"), &files, &StrategyConfig::default()).unwrap();

        assert_eq!(first.id(), second.id());
        assert_ne!(first.id(), other.id());
        assert_eq!(first.id().len(), 16);
    }
}
