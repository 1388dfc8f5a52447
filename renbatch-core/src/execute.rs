use crate::error::{RenameError, Result};
use crate::log::RunLog;
use crate::plan::RenamePlan;
use crate::preview::{render_line, render_table, Preview};
use crate::strategy::RenamePair;
use serde::Serialize;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Options for executing a rename plan
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecuteOptions {
    /// Report the plan without touching the filesystem
    pub dry_run: bool,
    pub preview: Preview,
    pub use_color: bool,
}

/// What an execution did.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub plan_id: String,
    /// True when nothing was renamed because this was a dry run.
    pub preview: bool,
    /// Pairs reported (dry run) or committed (real run), in plan order.
    pub processed: Vec<RenamePair>,
    /// Number of case-only renames that went through a temporary name.
    pub swaps: usize,
}

impl ExecutionReport {
    pub fn renamed_count(&self) -> usize {
        self.processed.len()
    }
}

/// Preview or apply `plan`, writing one line per rename to `out`.
///
/// Renames run strictly in plan order. The first failure stops the run with
/// [`RenameError::RenameFailed`]; renames committed before it are not undone
/// and are still reported.
pub fn execute_plan(
    plan: &RenamePlan,
    options: &ExecuteOptions,
    out: &mut dyn Write,
    log: &mut RunLog,
) -> Result<ExecutionReport> {
    log.log(&format!(
        "{} plan {} ({} renames) in {}",
        if options.dry_run { "Previewing" } else { "Applying" },
        plan.id(),
        plan.renamed_count(),
        plan.dir().display()
    ))?;

    let mut report = ExecutionReport {
        plan_id: plan.id().to_string(),
        preview: options.dry_run,
        processed: Vec::with_capacity(plan.renamed_count()),
        swaps: 0,
    };

    // Only case-only renames need the exact spelling of every entry
    let mut names = if !options.dry_run && plan.pairs().iter().any(RenamePair::is_case_only) {
        Some(DirNames::read(plan.dir())?)
    } else {
        None
    };

    let mut failure = None;
    for pair in plan.pairs() {
        if !options.dry_run {
            match perform_rename(plan, pair, names.as_mut(), log) {
                Ok(true) => report.swaps += 1,
                Ok(false) => {},
                Err(e) => {
                    failure = Some(e);
                    break;
                },
            }
        }

        if options.preview == Preview::Lines {
            writeln!(out, "{}", render_line(pair, options.use_color)).map_err(RenameError::Output)?;
        }
        report.processed.push(pair.clone());
    }

    match failure {
        Some(e) => {
            // The rename error wins over any trouble writing the partial table
            let _ = finish_output(&report, options, out);
            Err(e)
        },
        None => {
            finish_output(&report, options, out)?;
            Ok(report)
        },
    }
}

fn finish_output(report: &ExecutionReport, options: &ExecuteOptions, out: &mut dyn Write) -> Result<()> {
    if options.preview == Preview::Table && !report.processed.is_empty() {
        write!(
            out,
            "{}",
            render_table(&report.processed, options.dry_run, options.use_color)
        )
        .map_err(RenameError::Output)?;
    }
    out.flush().map_err(RenameError::Output)
}

/// Exact entry names in the plan's directory, read once per run and kept in
/// step with the renames as they commit.
#[derive(Debug)]
struct DirNames(HashSet<OsString>);

impl DirNames {
    fn read(dir: &Path) -> Result<Self> {
        let unreadable = |source: io::Error| RenameError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        };
        let names = fs::read_dir(dir)
            .map_err(unreadable)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<io::Result<_>>()
            .map_err(unreadable)?;
        Ok(Self(names))
    }

    /// Compared byte for byte, whatever the filesystem thinks of case.
    fn contains(&self, name: &str) -> bool {
        self.0.contains(OsStr::new(name))
    }

    fn commit(&mut self, pair: &RenamePair) {
        self.0.remove(OsStr::new(&pair.old_name));
        self.0.insert(OsString::from(&pair.new_name));
    }
}

/// Rename one pair inside the plan's directory. Returns true if a temporary
/// name was used.
fn perform_rename(
    plan: &RenamePlan,
    pair: &RenamePair,
    names: Option<&mut DirNames>,
    log: &mut RunLog,
) -> Result<bool> {
    let dir = plan.dir();
    let from = dir.join(&pair.old_name);
    let to = dir.join(&pair.new_name);
    let failed = |source: io::Error| RenameError::RenameFailed {
        old_name: pair.old_name.clone(),
        new_name: pair.new_name.clone(),
        source,
    };

    log.log(&format!("Renaming {pair}"))?;

    let swapped = if pair.is_case_only() {
        // On a case-insensitive filesystem `to` resolves to `from` itself, so
        // only an entry spelled exactly like the new name is a real clash.
        if names.as_deref().is_some_and(|n| n.contains(&pair.new_name)) {
            return Err(failed(already_exists(&pair.new_name)));
        }

        let temp_name = temp_name_for(plan, pair).map_err(failed)?;
        let temp = dir.join(&temp_name);
        log.log(&format!("Case-only rename, using temp: {temp_name}"))?;

        fs::rename(&from, &temp).map_err(failed)?;
        if let Err(e) = fs::rename(&temp, &to) {
            let _ = log.log(&format!("Second step failed, file left at {temp_name}"));
            return Err(failed(io::Error::new(
                e.kind(),
                format!("{e} (file left at {temp_name})"),
            )));
        }
        true
    } else {
        if fs::symlink_metadata(&to).is_ok() {
            return Err(failed(already_exists(&pair.new_name)));
        }
        fs::rename(&from, &to).map_err(failed)?;
        false
    };

    if let Some(names) = names {
        names.commit(pair);
    }
    log.log(&format!("Successfully renamed {pair}"))?;
    Ok(swapped)
}

fn already_exists(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("destination {name} already exists"),
    )
}

/// `.<old>.<pid>.<random hex>.renbatch.tmp`: hidden, unique to this process,
/// and neither present in the directory nor the target of any rename in the
/// plan.
fn temp_name_for(plan: &RenamePlan, pair: &RenamePair) -> io::Result<String> {
    let pid = std::process::id();
    loop {
        let candidate = format!(
            ".{}.{pid}.{:08x}.renbatch.tmp",
            pair.old_name,
            rand::random::<u32>()
        );
        if plan.targets(&candidate) {
            continue;
        }
        match fs::symlink_metadata(plan.dir().join(&candidate)) {
            Ok(_) => continue,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(candidate),
            Err(e) => return Err(e),
        }
    }
}
