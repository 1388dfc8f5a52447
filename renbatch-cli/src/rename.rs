use anyhow::{Context, Result};
use renbatch_core::{
    rename_operation, Config, OutputFormatter, Preview, RenameError, RunOptions, StrategyConfig,
};
use std::io::{self, Write};
use std::str::FromStr;

use crate::cli::args::RunArgs;
use crate::cli::OutputFormat;

pub fn handle_rename(
    strategy: &StrategyConfig,
    run: RunArgs,
    config: &Config,
    no_color: bool,
) -> Result<()> {
    // Reject bad input before the engine looks at the directory
    strategy.validate()?;
    if !run.dir.is_dir() {
        return Err(RenameError::InvalidConfig(format!(
            "{} is not a directory",
            run.dir.display()
        ))
        .into());
    }

    let preview = if run.quiet || run.output == OutputFormat::Json {
        Preview::None
    } else {
        run.preview.map(Into::into).unwrap_or_else(|| {
            Preview::from_str(&config.defaults.preview_format).unwrap_or_default()
        })
    };

    let options = RunOptions {
        dry_run: run.dry_run,
        preview,
        use_color: if no_color {
            Some(false)
        } else {
            config.defaults.use_color
        },
        log_file: run.log_file.or_else(|| config.defaults.log_file.clone()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = rename_operation(&run.dir, strategy, &options, &mut out)
        .with_context(|| format!("{} failed in {}", strategy.mode(), run.dir.display()))?;

    match run.output {
        OutputFormat::Json => {
            writeln!(out, "{}", result.format_json())?;
        },
        OutputFormat::Summary if run.quiet => {},
        OutputFormat::Summary => {
            if result.renamed == 0 {
                write!(out, "{}", result.format_summary())?;
            } else {
                eprint!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
