use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use renbatch_core::{Config, OutputFormatter, RenameError, StrategyConfig, VersionResult};
use std::path::Path;
use std::process;

mod cli;
mod rename;

use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();

    // Handle -C directory flag
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("Failed to change to directory: {}", dir.display()))
            .unwrap_or_else(|e| {
                eprintln!("Error: {e:#}");
                process::exit(2);
            });
    }

    // Load config to get defaults
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: ignoring config: {e:#}");
        Config::default()
    });

    let result = match cli.command {
        Commands::Seq { run, start, pad } => {
            let strategy = StrategyConfig::Sequential {
                start: start.unwrap_or(config.defaults.start),
                pad: pad.unwrap_or(config.defaults.pad),
            };
            rename::handle_rename(&strategy, run, &config, cli.no_color)
        },

        Commands::Date { run } => {
            rename::handle_rename(&StrategyConfig::DatePrefix, run, &config, cli.no_color)
        },

        Commands::Replace { run, find, replace } => {
            let strategy = StrategyConfig::FindReplace { find, replace };
            rename::handle_rename(&strategy, run, &config, cli.no_color)
        },

        Commands::Lower { run } => {
            rename::handle_rename(&StrategyConfig::Lowercase, run, &config, cli.no_color)
        },

        Commands::Version { output } => handle_version(output),

        Commands::Completions { shell, out_dir } => handle_completions(shell, out_dir.as_deref()),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// 1 = rename conflict or failure, 2 = invalid input, 3 = anything else
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<RenameError>()
        .map_or(3, RenameError::exit_code)
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "renbatch".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}

fn handle_completions(shell: Shell, out_dir: Option<&Path>) -> Result<()> {
    let mut cmd = Cli::command();
    match out_dir {
        Some(dir) => generate_completions(shell, &mut cmd, "renbatch", dir),
        None => {
            clap_complete::generate(shell, &mut cmd, "renbatch", &mut std::io::stdout());
            Ok(())
        },
    }
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    eprintln!("Generated completion file: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;

    #[test]
    fn test_generate_completions_bash() {
        let temp_dir = TempDir::new().unwrap();
        let mut cmd = Cli::command();

        generate_completions(Shell::Bash, &mut cmd, "renbatch", temp_dir.path()).unwrap();

        let completion_file = temp_dir.path().join("renbatch.bash");
        let content = std::fs::read_to_string(completion_file).unwrap();
        assert!(content.contains("complete"));
        assert!(content.contains("renbatch"));
    }

    #[test]
    fn test_generate_completions_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("dir");
        let mut cmd = Cli::command();

        generate_completions(Shell::Zsh, &mut cmd, "renbatch", &nested_path).unwrap();

        assert!(nested_path.join("_renbatch").exists());
    }

    #[test]
    fn test_exit_codes() {
        let invalid: anyhow::Error = RenameError::InvalidConfig("bad".into()).into();
        assert_eq!(exit_code(&invalid), 2);

        let failed = anyhow::Error::from(RenameError::RenameFailed {
            old_name: "a".into(),
            new_name: "b".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        })
        .context("seq failed in .");
        assert_eq!(exit_code(&failed), 1);

        assert_eq!(exit_code(&anyhow::anyhow!("something else")), 3);
    }
}
