use proptest::prelude::*;
use renbatch_core::{build_plan, FileEntry, RenameStrategy, Sequential, StrategyConfig};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

fn entries(names: &[String]) -> Vec<FileEntry> {
    let mut sorted = names.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
        .into_iter()
        .map(|name| FileEntry {
            path: PathBuf::from(&name),
            name,
            modified: SystemTime::UNIX_EPOCH,
        })
        .collect()
}

fn file_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z0-9_.-]{1,12}", 0..12)
}

proptest! {
    #[test]
    fn sequential_matches_printf_format(
        names in file_names(),
        start in 0u64..100_000,
        pad in 0usize..8,
    ) {
        let files = entries(&names);
        let pairs = Sequential { start, pad }.compute_names(&files);

        prop_assert_eq!(pairs.len(), files.len());
        for (i, (pair, file)) in pairs.iter().zip(&files).enumerate() {
            let expected = format!("{:0pad$}-{}", start + i as u64, file.name, pad = pad);
            prop_assert_eq!(&pair.old_name, &file.name);
            prop_assert_eq!(&pair.new_name, &expected);
        }
    }

    #[test]
    fn lowercase_plan_is_idempotent(names in file_names()) {
        let files = entries(&names);
        let plan = build_plan(Path::new("."), &files, &StrategyConfig::Lowercase);
        // Distinct names can fold together; that is rejected, not renamed
        if let Ok(plan) = plan {
            let renamed: Vec<String> = files
                .iter()
                .map(|f| {
                    plan.pairs()
                        .iter()
                        .find(|p| p.old_name == f.name)
                        .map_or_else(|| f.name.clone(), |p| p.new_name.clone())
                })
                .collect();

            let second = build_plan(Path::new("."), &entries(&renamed), &StrategyConfig::Lowercase)
                .unwrap();
            prop_assert!(second.is_empty());
            prop_assert!(plan.pairs().iter().all(|p| p.old_name != p.new_name));
        }
    }

    #[test]
    fn find_replace_without_match_is_empty(names in file_names()) {
        let files = entries(&names);
        let config = StrategyConfig::FindReplace {
            find: "#".to_string(),
            replace: "x".to_string(),
        };
        let plan = build_plan(Path::new("."), &files, &config).unwrap();
        prop_assert_eq!(plan.renamed_count(), 0);
    }
}
