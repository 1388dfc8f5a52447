use crate::execute::ExecutionReport;
use crate::operations::RunState;
use crate::plan::RenamePlan;
use crate::strategy::{RenamePair, StrategyConfig};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of one rename run
#[derive(Debug, Serialize)]
pub struct RenameResult {
    pub plan_id: String,
    pub dir: PathBuf,
    pub strategy: StrategyConfig,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub renamed: usize,
    pub swaps: usize,
    pub state: RunState,
    pub renames: Vec<RenamePair>,
}

impl RenameResult {
    pub fn new(plan: &RenamePlan, report: &ExecutionReport, state: RunState) -> Self {
        Self {
            plan_id: plan.id().to_string(),
            dir: plan.dir().to_path_buf(),
            strategy: plan.strategy().clone(),
            dry_run: report.preview,
            files_scanned: plan.files_scanned(),
            renamed: report.renamed_count(),
            swaps: report.swaps,
            state,
            renames: report.processed.clone(),
        }
    }
}

/// Result of a version command
#[derive(Debug, Serialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": self.strategy.mode(),
            "plan_id": self.plan_id,
            "dir": self.dir,
            "strategy": self.strategy,
            "dry_run": self.dry_run,
            "state": self.state,
            "summary": {
                "files_scanned": self.files_scanned,
                "renamed": self.renamed,
                "swaps": self.swaps,
            },
            "renames": self.renames,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.renamed == 0 {
            writeln!(output, "(no files to rename)").unwrap();
            return output;
        }

        let verb = if self.dry_run {
            "Would rename"
        } else {
            "Renamed"
        };
        write!(
            output,
            "{} {} of {} files ({})",
            verb, self.renamed, self.files_scanned, self.strategy
        )
        .unwrap();
        if self.swaps > 0 {
            write!(output, ", {} case-only", self.swaps).unwrap();
        }
        writeln!(output).unwrap();

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(renamed: usize, dry_run: bool) -> RenameResult {
        let renames: Vec<RenamePair> = (0..renamed)
            .map(|i| RenamePair::new(format!("f{i}"), format!("{:03}-f{i}", i + 1)))
            .collect();
        RenameResult {
            plan_id: "0123456789abcdef".to_string(),
            dir: PathBuf::from("photos"),
            strategy: StrategyConfig::default(),
            dry_run,
            files_scanned: 4,
            renamed,
            swaps: 0,
            state: if dry_run {
                RunState::DryRunReported
            } else {
                RunState::Completed
            },
            renames,
        }
    }

    #[test]
    fn test_summary_for_empty_plan() {
        assert_eq!(result(0, false).format_summary(), "(no files to rename)\n");
    }

    #[test]
    fn test_summary_wording() {
        assert_eq!(
            result(2, true).format_summary(),
            "Would rename 2 of 4 files (seq (start=1, pad=3))\n"
        );
        assert!(result(2, false).format_summary().starts_with("Renamed 2 of 4"));
    }

    #[test]
    fn test_json_output() {
        let value: serde_json::Value =
            serde_json::from_str(&result(1, false).format(OutputFormat::Json)).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["operation"], "seq");
        assert_eq!(value["state"], "completed");
        assert_eq!(value["summary"]["renamed"], 1);
        assert_eq!(value["renames"][0]["old_name"], "f0");
        assert_eq!(value["renames"][0]["new_name"], "001-f0");
        assert_eq!(value["strategy"]["pad"], 3);
    }

    #[test]
    fn test_version_output() {
        let version = VersionResult {
            name: "renbatch".to_string(),
            version: "0.1.0".to_string(),
        };
        assert_eq!(version.format_summary(), "renbatch 0.1.0");
        assert_eq!(
            version.format_json(),
            r#"{"name":"renbatch","version":"0.1.0"}"#
        );
    }
}
