//! One batch-rename run, from directory snapshot to report.
//!
//! This is the entry point the CLI calls. It owns the run state machine and
//! the run log; the pieces it drives live in `enumerate`, `plan` and `execute`.

use crate::enumerate::list_files;
use crate::error::RenameError;
use crate::execute::{execute_plan, ExecuteOptions};
use crate::log::RunLog;
use crate::output::RenameResult;
use crate::plan::build_plan;
use crate::preview::{should_use_color, Preview};
use crate::strategy::StrategyConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where a run is. `DryRunReported`, `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Enumerated,
    Planned,
    DryRunReported,
    Executing,
    Completed,
    Failed,
}

impl RunState {
    fn can_move_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Enumerated)
                | (Self::Enumerated, Self::Planned)
                | (Self::Planned, Self::DryRunReported | Self::Executing)
                | (Self::Executing, Self::Completed | Self::Failed)
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Enumerated => "enumerated",
            Self::Planned => "planned",
            Self::DryRunReported => "dry-run reported",
            Self::Executing => "executing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Options for a rename run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub preview: Preview,
    /// `None` = detect from the terminal
    pub use_color: Option<bool>,
    pub log_file: Option<PathBuf>,
}

struct Run {
    state: RunState,
    log: RunLog,
}

impl Run {
    fn advance(&mut self, next: RunState) -> Result<(), RenameError> {
        debug_assert!(
            self.state.can_move_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        self.log.log(&format!("State: {} -> {}", self.state, next))?;
        self.state = next;
        Ok(())
    }
}

/// High-level rename operation - equivalent to one `renbatch <mode>` invocation.
///
/// `dir` must already exist; `config` is validated here again before any
/// filesystem access. Rename lines go to `out` as they happen.
pub fn rename_operation(
    dir: &Path,
    config: &StrategyConfig,
    options: &RunOptions,
    out: &mut dyn Write,
) -> Result<RenameResult> {
    config.validate()?;

    let mut run = Run {
        state: RunState::Idle,
        log: RunLog::open(options.log_file.as_deref())?,
    };
    run.log.log(&format!(
        "Starting {} in {} (dry_run={}, preview={:?})",
        config,
        dir.display(),
        options.dry_run,
        options.preview
    ))?;

    let entries =
        list_files(dir).with_context(|| format!("Failed to list files in {}", dir.display()))?;
    run.advance(RunState::Enumerated)?;
    run.log.log(&format!("Found {} files", entries.len()))?;

    let plan = build_plan(dir, &entries, config)?;
    run.advance(RunState::Planned)?;
    run.log.log(&format!(
        "Plan {}: {} of {} files change name",
        plan.id(),
        plan.renamed_count(),
        plan.files_scanned()
    ))?;

    let execute_options = ExecuteOptions {
        dry_run: options.dry_run,
        preview: options.preview,
        use_color: should_use_color(options.use_color),
    };

    if options.dry_run {
        let report = execute_plan(&plan, &execute_options, out, &mut run.log)?;
        run.advance(RunState::DryRunReported)?;
        return Ok(RenameResult::new(&plan, &report, run.state));
    }

    run.advance(RunState::Executing)?;
    match execute_plan(&plan, &execute_options, out, &mut run.log) {
        Ok(report) => {
            run.advance(RunState::Completed)?;
            Ok(RenameResult::new(&plan, &report, run.state))
        },
        Err(e) => {
            let e = anyhow::Error::from(e);
            // Best effort: the rename error matters more than a log failure
            let _ = run.log.log(&format!("Error: {e:#}"));
            let _ = run.advance(RunState::Failed);
            Err(e)
        },
    }
}
